use crate::error::UnknownOperation;
use std::fmt;
use std::str::FromStr;

/// What to do with mapped records once a source has been processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SaveAndShow,
    NosaveAndShow,
    SaveAndNoshow,
}

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::SaveAndShow,
        Operation::NosaveAndShow,
        Operation::SaveAndNoshow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::SaveAndShow => "save-and-show",
            Operation::NosaveAndShow => "nosave-and-show",
            Operation::SaveAndNoshow => "save-and-noshow",
        }
    }

    pub fn saves(self) -> bool {
        matches!(self, Operation::SaveAndShow | Operation::SaveAndNoshow)
    }

    pub fn shows(self) -> bool {
        matches!(self, Operation::SaveAndShow | Operation::NosaveAndShow)
    }
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|operation| operation.as_str() == value)
            .ok_or_else(|| UnknownOperation(value.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
