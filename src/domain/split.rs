// ============================================================
// Domain — Split
// ============================================================
// A split is a named partition of the corpus. The set of
// splits is closed: anything outside Train / Dev / Test is
// rejected at parse time with Error::UnknownSplit, so the
// rest of the crate never deals with free-form names.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A named partition of the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Dev,
    Test,
}

impl Split {
    /// Every split, in canonical order.
    pub const ALL: [Split; 3] = [Split::Train, Split::Dev, Split::Test];

    /// Canonical lowercase name, as used in corpus file names
    pub fn name(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Dev   => "dev",
            Split::Test  => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Split {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Split::Train),
            "dev"   => Ok(Split::Dev),
            "test"  => Ok(Split::Test),
            other   => Err(Error::UnknownSplit(other.to_string())),
        }
    }
}
