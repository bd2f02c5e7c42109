use crate::app::AppContext;
use crate::domain::{AppError, DocumentRequest, FinalPrompt, bind};
use crate::ports::{TemplateStore, TextGenerator};

/// Bind a request without invoking the model.
pub fn preview_prompt<G, T>(
    ctx: &AppContext<G, T>,
    request: &DocumentRequest,
) -> Result<FinalPrompt, AppError>
where
    G: TextGenerator,
    T: TemplateStore,
{
    bind(ctx.templates(), request, &ctx.config().document)
}
