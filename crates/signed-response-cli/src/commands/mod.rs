pub mod inspect;
pub mod sign;
pub mod verify;

use crate::args::{Cli, Command};

pub fn dispatch(cli: Cli) -> i32 {
    match cli.cmd {
        Command::Sign(args) => sign::cmd_sign(args),
        Command::Verify(args) => verify::cmd_verify(args),
        Command::Inspect(args) => inspect::cmd_inspect(args),
    }
}
