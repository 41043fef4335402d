//! Command handlers for the toggle API, one module per command.
//!
//! | Command | Input | Data |
//! |---|---|---|
//! | `vote.create` | `targetId`, `targetType`, `voteType` | `VoteSnapshot` |
//! | `vote.status` | `targetId`, `targetType` | `VoteStatus` |
//! | `collection.toggle` | `questionId` | `SaveStatus` |
//! | `collection.status` | `questionId` | `SaveStatus` |
//! | `collection.list` | | `{ questions }` |
//! | `target.get` | `targetId`, `targetType` | `Tally` |

pub mod collection_list;
pub mod collection_status;
pub mod collection_toggle;
pub mod target_get;
pub mod vote_create;
pub mod vote_status;

use crate::microsvc::Service;
use crate::read_model::ReadModelStore;
use crate::toggle::ToggleService;

/// A service with every toggle command registered.
pub fn service<S: ReadModelStore + 'static>(
    toggles: ToggleService<S>,
) -> Service<ToggleService<S>> {
    crate::register_handlers!(
        Service::new(toggles),
        vote_create,
        vote_status,
        collection_toggle,
        collection_status,
        collection_list,
        target_get,
    )
}
