//! Domain types: vote targets, per-user toggle records, and the vote
//! transition table shared by the server and the optimistic client views.

mod save;
mod target;
mod vote;

pub use save::SaveRecord;
pub use target::{Target, TargetKind};
pub use vote::{Tally, Transition, VoteDirection, VoteRecord, VoteSnapshot, VoteState};

/// Joins record key parts with `|`. A `\` or `|` inside a part is
/// backslash-escaped, so two different tuples never share a key.
pub(crate) fn composite_key(parts: &[&str]) -> String {
    let mut key = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            key.push('|');
        }
        for ch in part.chars() {
            if ch == '|' || ch == '\\' {
                key.push('\\');
            }
            key.push(ch);
        }
    }
    key
}
