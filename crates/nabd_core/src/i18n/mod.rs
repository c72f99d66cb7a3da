//! Localization ports consumed at render and menu-build time.
//!
//! # Responsibility
//! - Define the total `Translator` contract (raw-key fallback, never fails).
//! - Carry read-only locale parameters (language, direction, currency).
//!
//! # Invariants
//! - Boards store translation keys; localized text is produced on demand.

pub(crate) mod locale;
mod translator;

pub use locale::{Language, LocaleContext, TextDirection};
pub use translator::{RawKeyTranslator, StaticTranslator, Translator};
