//! Command scripts for exercising a coprocessor.
//!
//! A script is the CLI's stand-in for a user-space test client: a plain
//! text file with one directive per line, driven through a
//! [`HostDriver`](crate::host::HostDriver).
//!
//! Syntax:
//! ```text
//! ; comment
//! input +++000---...   ; 81 trit characters (N/O/P or -/0/+), MSB first
//! push                 ; any opcode mnemonic: nop push pop add not and sha3
//! output               ; print the OUTPUT register
//! status               ; print the STATUS register
//! ```

use crate::coproc::Opcode;
use crate::ternary::TritVector;
use std::path::Path;
use thiserror::Error;

/// One script directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOp {
    /// Transfer an operand into the INPUT range.
    Input(TritVector),
    /// Run a command through one full device cycle.
    Command(Opcode),
    /// Report the OUTPUT register.
    ShowOutput,
    /// Report the STATUS register.
    ShowStatus,
}

/// A parsed script.
#[derive(Debug, Clone, Default)]
pub struct Script {
    /// Directives in file order.
    pub ops: Vec<ScriptOp>,
}

impl Script {
    /// Parse script source text.
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        let mut ops = Vec::new();
        for (line_num, line) in source.lines().enumerate() {
            if let Some(op) = parse_line(line, line_num + 1)? {
                ops.push(op);
            }
        }
        Ok(Self { ops })
    }

    /// Load and parse a script file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let source = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ScriptError::Io(e.to_string()))?;
        Self::parse(&source)
    }

    /// Number of directives.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the script has no directives.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

fn parse_line(line: &str, line_num: usize) -> Result<Option<ScriptOp>, ScriptError> {
    let line = line.trim();

    // Skip empty lines and comments
    if line.is_empty() || line.starts_with(';') {
        return Ok(None);
    }

    // Remove inline comments
    let line = match line.find(';') {
        Some(idx) => line[..idx].trim(),
        None => line,
    };
    if line.is_empty() {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let Some(directive) = parts.next() else {
        return Ok(None);
    };
    let operand = parts.next();

    if parts.next().is_some() {
        return Err(ScriptError::Syntax {
            line: line_num,
            message: "too many fields".into(),
        });
    }

    match directive.to_lowercase().as_str() {
        "input" => {
            let trits = operand.ok_or_else(|| ScriptError::Syntax {
                line: line_num,
                message: "input requires an 81-trit operand".into(),
            })?;
            let vector = TritVector::parse(trits).map_err(|e| ScriptError::Syntax {
                line: line_num,
                message: e.to_string(),
            })?;
            Ok(Some(ScriptOp::Input(vector)))
        }
        "output" => reject_operand(operand, line_num, ScriptOp::ShowOutput),
        "status" => reject_operand(operand, line_num, ScriptOp::ShowStatus),
        mnemonic => match opcode_for(mnemonic) {
            Some(opcode) => reject_operand(operand, line_num, ScriptOp::Command(opcode)),
            None => Err(ScriptError::Syntax {
                line: line_num,
                message: format!("unknown directive '{}'", mnemonic),
            }),
        },
    }
}

fn reject_operand(
    operand: Option<&str>,
    line_num: usize,
    op: ScriptOp,
) -> Result<Option<ScriptOp>, ScriptError> {
    match operand {
        Some(extra) => Err(ScriptError::Syntax {
            line: line_num,
            message: format!("unexpected operand '{}'", extra),
        }),
        None => Ok(Some(op)),
    }
}

fn opcode_for(mnemonic: &str) -> Option<Opcode> {
    match mnemonic {
        "nop" => Some(Opcode::Nop),
        "push" => Some(Opcode::Push),
        "pop" => Some(Opcode::Pop),
        "add" => Some(Opcode::Add),
        "not" => Some(Opcode::Not),
        "and" => Some(Opcode::And),
        "sha3" => Some(Opcode::Sha3),
        _ => None,
    }
}

/// Errors that can occur while loading a script.
#[derive(Debug, Clone, Error)]
pub enum ScriptError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },
}
