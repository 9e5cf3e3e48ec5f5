//! Command line of both tools

use std::ffi::OsString;

use clap::{ArgAction, Parser};

use crate::display::Action;

/// Control a LCD display.
///
/// A flag given twice keeps its last occurrence.
#[derive(Parser, Debug, PartialEq)]
#[command(name = "chardisplay", version, args_override_self = true)]
pub struct DisplayArgs {
    /// The action to perform. ("display" or "clear")
    #[arg(short = 'a', value_name = "ACTION", default_value = "display")]
    pub action: String,

    /// The text to display on line 1.
    #[arg(
        long = "l1",
        value_name = "WORD",
        num_args = 0..,
        action = ArgAction::Set,
        allow_negative_numbers = true
    )]
    pub line1: Vec<String>,

    /// The text to display on line 2.
    #[arg(
        long = "l2",
        value_name = "WORD",
        num_args = 0..,
        action = ArgAction::Set,
        allow_negative_numbers = true
    )]
    pub line2: Vec<String>,
}

impl DisplayArgs {
    /// Parse `std::env::args_os()`, exit with usage on error
    pub fn parse_args() -> Self {
        Self::parse_from(single_dash_longs(std::env::args_os()))
    }

    /// Parse an argument list that starts with the program name
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(single_dash_longs(args))
    }

    #[allow(missing_docs)]
    pub fn action(&self) -> Action {
        Action::from(self.action.as_str())
    }
}

/// Print the MCP3008 channels 0 to 6, scaled to 0-100, tab separated.
#[derive(Parser, Debug, PartialEq)]
#[command(name = "mcp3008", version)]
pub struct SamplerArgs {}

const SINGLE_DASH_LONGS: [&str; 2] = ["l1", "l2"];

// `-l1` and `-l2` are multi-letter flags behind a single dash, clap reads those as
// `-l` clusters, so they are rewritten to `--l1`/`--l2` before parsing
fn single_dash_longs<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let rewritten = arg.to_str().and_then(|arg| {
                let flag = arg.strip_prefix('-').filter(|rest| !rest.starts_with('-'))?;
                let name = flag.split('=').next()?;
                SINGLE_DASH_LONGS
                    .contains(&name)
                    .then(|| OsString::from(format!("-{arg}")))
            });
            rewritten.unwrap_or(arg)
        })
        .collect()
}
