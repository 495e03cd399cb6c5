// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Clone command arguments.
//!
//! ```text
//! gitb clone git://example.com/foo/bar.git
//!   name        = bar                          (--name)
//!   description = git://example.com/foo/bar.git (--description)
//! ```

use clap::Args;

use crate::clone::CloneFields;

/// Arguments for the `clone` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CloneArgs {
    /// Remote url.
    #[arg(value_name = "URL")]
    pub url: String,

    /// Repository name, derived from the url when omitted.
    #[arg(long)]
    pub name: Option<String>,

    /// Repository description, the url when omitted.
    #[arg(short = 'm', long)]
    pub description: Option<String>,
}

impl CloneArgs {
    /// Form fields as typed by the user.
    #[must_use]
    pub fn to_fields(&self) -> CloneFields {
        CloneFields::builder()
            .url(self.url.as_str())
            .maybe_name(self.name.as_deref())
            .maybe_description(self.description.as_deref())
            .build()
    }
}
