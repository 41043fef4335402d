//! Handler: vote.status

use serde::Deserialize;
use serde_json::Value;

use crate::domain::TargetKind;
use crate::microsvc::{Context, HandlerError};
use crate::read_model::ReadModelStore;
use crate::toggle::ToggleService;

pub const COMMAND: &str = "vote.status";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub target_id: String,
    pub target_type: TargetKind,
}

pub fn guard<R>(ctx: &Context<R>) -> bool {
    ctx.has_fields(&["targetId", "targetType"])
}

pub fn handle<S: ReadModelStore>(
    ctx: &Context<ToggleService<S>>,
) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let status = ctx
        .backend()
        .has_voted(ctx.user_id(), input.target_type, &input.target_id)?;
    Ok(serde_json::to_value(status)?)
}
