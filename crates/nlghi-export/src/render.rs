use serde::Serialize;
use tera::{Context, Tera};

use crate::error::ExportError;

/// Render one template source against a serializable context whose
/// top-level fields become the template variables.
///
/// Output is plain text whatever the template name, so autoescaping is
/// switched off. A context that does not serialize to a map is a
/// render error.
pub fn render_template<T: Serialize>(
    template_name: &str,
    template_content: &str,
    context: &T,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.autoescape_on(Vec::new());
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(format!("{template_name}: {e}")))?;

    let context =
        Context::from_serialize(context).map_err(|e| ExportError::TemplateRender(e.to_string()))?;
    Ok(tera.render(template_name, &context)?)
}
