use crate::domain::student::Student;
use crate::error::Result;
use std::io::Write;

/// Writes the final authorized roster as CSV to any `Write` target.
pub struct RosterWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> RosterWriter<W> {
    pub fn new(target: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(target),
        }
    }

    /// Serializes the roster, one record per row, header included.
    pub fn write_roster(&mut self, roster: Vec<Student>) -> Result<()> {
        for student in roster {
            self.writer.serialize(student)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
