use serde::{Deserialize, Serialize};

use super::composite_key;
use crate::ReadModel;

/// Membership of a question in a user's saved collection.
///
/// Existence is the whole state: saving inserts the record, unsaving deletes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ReadModel)]
#[readmodel(collection = "saves", crate = "crate")]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    #[readmodel(id)]
    pub key: String,
    pub user_id: String,
    pub question_id: String,
}

impl SaveRecord {
    pub fn new(user_id: impl Into<String>, question_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let question_id = question_id.into();
        Self {
            key: Self::key_for(&user_id, &question_id),
            user_id,
            question_id,
        }
    }

    pub fn key_for(user_id: &str, question_id: &str) -> String {
        composite_key(&[user_id, question_id])
    }
}
