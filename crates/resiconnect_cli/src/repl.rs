//! Read-eval-print loop over one input stream.

use log::error;
use resiconnect_core::command::help_text;
use resiconnect_core::{parse_command, JsonDirectoryStorage, ModelManager};
use std::io::{self, BufRead, Write};

const PROMPT: &str = "> ";

/// Processes lines from `input` until `exit` or end of input.
///
/// Every mutating command is followed by a save; a failed save is reported
/// and the loop continues with the in-memory state.
pub fn run(
    model: &mut ModelManager,
    storage: &JsonDirectoryStorage,
    mut input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };

        let result = match command.execute(model) {
            Ok(result) => result,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };

        writeln!(output, "{}", result.feedback)?;
        if result.show_help {
            writeln!(output, "{}", help_text())?;
        }
        if result.mutated {
            if let Err(err) = storage.save_directory(model.directory()) {
                error!(
                    "event=cli_save module=cli status=error error_code={}",
                    err.code()
                );
                writeln!(output, "Could not save data file: {err}")?;
            }
        }
        if result.exit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::run;
    use resiconnect_core::{JsonDirectoryStorage, ModelManager};
    use std::io::Cursor;

    fn session(input: &str, storage: &JsonDirectoryStorage) -> (ModelManager, String) {
        let mut model = ModelManager::default();
        let mut output = Vec::new();
        run(&mut model, storage, Cursor::new(input), &mut output).unwrap();
        (model, String::from_utf8(output).unwrap())
    }

    #[test]
    fn mutating_commands_are_saved_and_exit_stops_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonDirectoryStorage::new(dir.path().join("data.json"));
        let input = "addstaff name/Tan Ah Kow phone/61234567 email/tan@u.edu a/Office designation/2\n\
                     exit\n\
                     liststaff\n";
        let (model, output) = session(input, &storage);

        assert!(output.contains("New staff added: Tan Ah Kow"));
        assert!(output.contains("Exiting Address Book as requested ..."));
        assert!(!output.contains("Listed all staff"));
        assert_eq!(model.directory().staff().len(), 1);

        let restored = storage.read_directory().unwrap().unwrap();
        assert_eq!(restored.staff().len(), 1);
    }

    #[test]
    fn errors_are_printed_and_nothing_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let storage = JsonDirectoryStorage::new(&path);
        let (_, output) = session("frobnicate\ndeletestudent 1\n", &storage);

        assert!(output.contains("Unknown command"));
        assert!(output.contains("The student index provided is invalid"));
        assert!(!path.exists());
    }
}
