//! Cross-cutting helpers shared by the library modules.

pub mod parallel;
