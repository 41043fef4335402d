//! Handler: collection.toggle

use serde::Deserialize;
use serde_json::Value;

use crate::microsvc::{Context, HandlerError};
use crate::read_model::ReadModelStore;
use crate::toggle::ToggleService;

pub const COMMAND: &str = "collection.toggle";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub question_id: String,
}

pub fn guard<R>(ctx: &Context<R>) -> bool {
    ctx.has_field("questionId")
}

pub fn handle<S: ReadModelStore>(
    ctx: &Context<ToggleService<S>>,
) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let status = ctx.backend().toggle_save(ctx.user_id(), &input.question_id)?;
    Ok(serde_json::to_value(status)?)
}
