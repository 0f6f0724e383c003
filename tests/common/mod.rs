use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes a batch that pays for caller 1 and registers `students` student
/// identities (1001, 1002, ...), all adults with generated names.
pub fn generate_registration_batch(path: &Path, students: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["op", "caller", "student", "name", "age", "amount"])?;
    wtr.write_record(["pay", "1", "", "", "", "1.0"])?;

    for i in 1..=students {
        let identity = (1000 + i).to_string();
        let name = format!("Student {}", i);
        wtr.write_record(["register", "1", &identity, &name, "19", ""])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Appends authorization rows for the given student identities, in order.
pub fn append_authorizations(path: &Path, identities: &[u64]) -> Result<(), Error> {
    let file = File::options().append(true).open(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    for identity in identities {
        wtr.write_record(["authorize", "0", &identity.to_string(), "", "", ""])?;
    }

    wtr.flush()?;
    Ok(())
}
