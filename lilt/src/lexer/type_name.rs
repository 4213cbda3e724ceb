// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Display, Formatter};

use strum::IntoEnumIterator;

/// The built-in type names a declaration may carry. These are recognized by
/// the lexer, so they are not available as user identifiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[derive(strum::AsRefStr, strum::EnumIter, strum::IntoStaticStr)]
pub enum TypeName {
    Int,
    Float,
    Func,
    Void,
    Bool,
    String,
    List,
    Map,
}

impl TypeName {
    pub fn parse(input: &str) -> Option<Self> {
        Self::iter().find(|x| x.as_ref() == input)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}
