//! microsvc integration tests for the toggle commands.

mod support;
mod commands;
