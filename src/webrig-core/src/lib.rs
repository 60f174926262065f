// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

pub mod command;
pub mod error;
pub mod link;
pub mod radio;
pub mod snapshot;

pub type DynResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub use command::{UiCommand, UiMessage};
pub use error::{RigError, RigResult};
pub use link::LinkState;
pub use radio::{AgcMode, Func, Level, Parm, RigMode};
pub use snapshot::RadioSnapshot;
