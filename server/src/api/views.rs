//! HTML view rendering
//!
//! Templates are compiled once at startup from the embedded `templates/`
//! directory. Names ending in `.html` are autoescaped.

use chrono::DateTime;
use minijinja::{Environment, Value};
use serde::Serialize;
use thiserror::Error;

use super::embedded::Templates;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Template {name} is not valid UTF-8")]
    Encoding { name: String },

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Compiled view templates
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    /// Compile every embedded template
    pub fn load() -> Result<Self, ViewError> {
        let mut env = Environment::new();
        env.add_filter("price", format_price);
        env.add_filter("datetime", format_datetime);

        for name in Templates::iter() {
            let Some(file) = Templates::get(&name) else {
                continue;
            };
            let source = String::from_utf8(file.data.into_owned()).map_err(|_| {
                ViewError::Encoding {
                    name: name.to_string(),
                }
            })?;
            env.add_template_owned(name.to_string(), source)?;
        }

        tracing::debug!(count = env.templates().count(), "Loaded view templates");
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, ViewError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(Value::from_serialize(&context))?)
    }
}

fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}

fn format_datetime(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_default()
}
