// crates/nzaddr-core/src/sql/executor.rs
use crate::error::Result;

/// Something that can run a multi-statement SQL script.
///
/// A script either runs to completion or returns an error; whatever the
/// script committed before the failing statement stays committed.
pub trait SqlExecutor {
    /// Runs `script` and returns its textual output (rows of any `SELECT`,
    /// one line per row, fields separated by `|`).
    fn run_script(&mut self, script: &str) -> Result<String>;
}

impl<E: SqlExecutor + ?Sized> SqlExecutor for &mut E {
    fn run_script(&mut self, script: &str) -> Result<String> {
        (**self).run_script(script)
    }
}

impl<E: SqlExecutor + ?Sized> SqlExecutor for Box<E> {
    fn run_script(&mut self, script: &str) -> Result<String> {
        (**self).run_script(script)
    }
}

#[cfg(feature = "pg")]
impl SqlExecutor for postgres::Client {
    fn run_script(&mut self, script: &str) -> Result<String> {
        use postgres::SimpleQueryMessage;

        let messages = self.simple_query(script)?;
        let mut out = String::new();
        for message in messages {
            if let SimpleQueryMessage::Row(row) = message {
                let fields: Vec<&str> = (0..row.len())
                    .map(|i| row.get(i).unwrap_or_default())
                    .collect();
                out.push_str(&fields.join("|"));
                out.push('\n');
            }
        }
        Ok(out)
    }
}

/// Opens a direct connection (no TLS; the database runs next to the ETL).
#[cfg(feature = "pg")]
pub fn connect(url: &str) -> Result<postgres::Client> {
    Ok(postgres::Client::connect(url, postgres::NoTls)?)
}
