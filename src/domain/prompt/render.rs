use minijinja::{Environment, UndefinedBehavior, Value};

use crate::domain::AppError;
use crate::ports::TemplateSource;

/// Render `main` with `partials` available to `{% include %}`.
///
/// Undefined variables are errors: every placeholder must be bound.
pub(crate) fn render_template(
    main: &TemplateSource,
    partials: &[TemplateSource],
    ctx: Value,
) -> Result<String, AppError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);

    for source in partials.iter().chain(std::iter::once(main)) {
        env.add_template(&source.name, &source.content).map_err(|e| {
            AppError::TemplateRender { template: source.name.clone(), reason: e.to_string() }
        })?;
    }

    let template = env.get_template(&main.name).map_err(|e| AppError::TemplateRender {
        template: main.name.clone(),
        reason: e.to_string(),
    })?;

    let rendered = template.render(ctx).map_err(|e| AppError::TemplateRender {
        template: main.name.clone(),
        reason: e.to_string(),
    })?;

    Ok(rendered.trim().to_string())
}
