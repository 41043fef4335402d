//! Handler: vote.create

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{TargetKind, VoteDirection};
use crate::microsvc::{Context, HandlerError};
use crate::read_model::ReadModelStore;
use crate::toggle::ToggleService;

pub const COMMAND: &str = "vote.create";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub target_id: String,
    pub target_type: TargetKind,
    pub vote_type: VoteDirection,
}

pub fn guard<R>(ctx: &Context<R>) -> bool {
    ctx.has_fields(&["targetId", "targetType", "voteType"])
}

pub fn handle<S: ReadModelStore>(
    ctx: &Context<ToggleService<S>>,
) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let snapshot = ctx.backend().apply_vote(
        ctx.user_id(),
        input.target_type,
        &input.target_id,
        input.vote_type,
    )?;
    Ok(serde_json::to_value(snapshot)?)
}
