//! Programmable transactions built for the vmc package.
//!
//! Transactions are only assembled here. Signing and submission belong to the
//! wallet behind a [`crate::wallet::TransactionSigner`].

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};

use crate::address::MoveAddress;
use crate::error::{Result, VisMoveError};

/// A `<package>::<module>::<function>` move-call target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTarget {
    pub package: MoveAddress,
    pub module: String,
    pub function: String,
}

impl FromStr for MoveTarget {
    type Err = VisMoveError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split("::").collect();
        let [package, module, function] = parts.as_slice() else {
            return Err(VisMoveError::InvalidArgument(format!(
                "move-call target '{s}' must look like <package>::<module>::<function>"
            )));
        };
        if module.is_empty() || function.is_empty() {
            return Err(VisMoveError::InvalidArgument(format!(
                "move-call target '{s}' has an empty module or function"
            )));
        }
        Ok(Self {
            package: package.parse()?,
            module: module.to_string(),
            function: function.to_string(),
        })
    }
}

impl fmt::Display for MoveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}

/// Primitive values passed by value to a move call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PureArg {
    String(String),
    Address(MoveAddress),
    U64(u64),
    OptionString(Option<String>),
}

impl PureArg {
    /// BCS encoding of the value as the chain expects it.
    pub fn to_bcs(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            PureArg::String(value) => bcs::to_bytes(value)?,
            PureArg::Address(address) => bcs::to_bytes(address.as_bytes())?,
            PureArg::U64(value) => bcs::to_bytes(value)?,
            PureArg::OptionString(value) => bcs::to_bytes(value)?,
        };
        Ok(bytes)
    }
}

/// A transaction input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallArg {
    /// An on-chain object; version and ownership are resolved by the wallet.
    Object { object_id: MoveAddress },
    /// A pure value with its base64 BCS bytes.
    Pure { value: PureArg, bytes: String },
}

impl CallArg {
    pub fn is_object(&self) -> bool {
        matches!(self, CallArg::Object { .. })
    }

    pub fn as_pure(&self) -> Option<&PureArg> {
        match self {
            CallArg::Pure { value, .. } => Some(value),
            CallArg::Object { .. } => None,
        }
    }
}

/// Reference to an input or to the result of an earlier command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Argument {
    Input(u16),
    Result(u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCall {
    pub target: MoveTarget,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveCall(MoveCall),
}

/// An unsigned programmable transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    inputs: Vec<CallArg>,
    commands: Vec<Command>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object input.
    pub fn object(&mut self, object_id: &str) -> Result<Argument> {
        let object_id = object_id.parse()?;
        self.push_input(CallArg::Object { object_id })
    }

    /// Adds a pure input, BCS-encoding it for the wallet.
    pub fn pure(&mut self, value: PureArg) -> Result<Argument> {
        let bytes = BASE64_STANDARD.encode(value.to_bcs()?);
        self.push_input(CallArg::Pure { value, bytes })
    }

    pub fn pure_string(&mut self, value: impl Into<String>) -> Result<Argument> {
        self.pure(PureArg::String(value.into()))
    }

    pub fn pure_address(&mut self, value: &str) -> Result<Argument> {
        self.pure(PureArg::Address(value.parse()?))
    }

    pub fn pure_u64(&mut self, value: u64) -> Result<Argument> {
        self.pure(PureArg::U64(value))
    }

    /// Appends a move call and returns a reference to its result.
    pub fn move_call(&mut self, target: &str, arguments: Vec<Argument>) -> Result<Argument> {
        let target = target.parse()?;
        let index = u16::try_from(self.commands.len())
            .map_err(|_| VisMoveError::InvalidArgument("too many commands".to_string()))?;
        self.commands.push(Command::MoveCall(MoveCall {
            target,
            type_arguments: Vec::new(),
            arguments,
        }));
        Ok(Argument::Result(index))
    }

    pub fn inputs(&self) -> &[CallArg] {
        &self.inputs
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// The move calls of this transaction, in order.
    pub fn move_calls(&self) -> impl Iterator<Item = &MoveCall> {
        self.commands.iter().map(|command| match command {
            Command::MoveCall(call) => call,
        })
    }

    /// Resolves the inputs referenced by a move call, in argument order.
    pub fn call_inputs<'a>(&'a self, call: &'a MoveCall) -> impl Iterator<Item = &'a CallArg> + 'a {
        call.arguments.iter().filter_map(move |argument| match argument {
            Argument::Input(index) => self.inputs.get(usize::from(*index)),
            Argument::Result(_) => None,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn push_input(&mut self, arg: CallArg) -> Result<Argument> {
        let index = u16::try_from(self.inputs.len())
            .map_err(|_| VisMoveError::InvalidArgument("too many inputs".to_string()))?;
        self.inputs.push(arg);
        Ok(Argument::Input(index))
    }
}
