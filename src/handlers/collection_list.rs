//! Handler: collection.list

use serde_json::{json, Value};

use crate::microsvc::{Context, HandlerError};
use crate::read_model::ReadModelStore;
use crate::toggle::ToggleService;

pub const COMMAND: &str = "collection.list";

pub fn guard<R>(_ctx: &Context<R>) -> bool {
    true
}

pub fn handle<S: ReadModelStore>(
    ctx: &Context<ToggleService<S>>,
) -> Result<Value, HandlerError> {
    let questions = ctx.backend().saved_questions(ctx.user_id())?;
    Ok(json!({ "questions": questions }))
}
