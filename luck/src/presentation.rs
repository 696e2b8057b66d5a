use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::{
    error::{RenderError, SettingsError},
    handler::Outcome,
};

/// Context handed to a template. Only the boolean outcome is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckContext {
    pub result: bool,
}

impl From<Outcome> for LuckContext {
    fn from(outcome: Outcome) -> Self {
        Self {
            result: outcome.result,
        }
    }
}

/// Output format of a response. Settings files and the CLI accept the same names.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Template {
    #[default]
    Html,
    Json,
    Plain,
}

impl std::str::FromStr for Template {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Template::Html),
            "json" => Ok(Template::Json),
            "plain" | "text" => Ok(Template::Plain),
            _ => Err(SettingsError::UnknownTemplate(s.to_string())),
        }
    }
}

impl TryFrom<String> for Template {
    type Error = SettingsError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Template {
    pub fn content_type(&self) -> &'static str {
        match self {
            Template::Html => "text/html; charset=utf-8",
            Template::Json => "application/json",
            Template::Plain => "text/plain; charset=utf-8",
        }
    }

    pub fn render(&self, context: &LuckContext) -> Result<String, RenderError> {
        let body = match self {
            Template::Html => render_page(context),
            Template::Json => serde_json::to_string(context)?,
            Template::Plain => format!("result: {}", context.result),
        };
        Ok(body)
    }
}

fn render_page(context: &LuckContext) -> String {
    let verdict = if context.result {
        "You guessed right. Lucky you!"
    } else {
        "Not this time. Try again."
    };
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Luck</title></head>\n\
         <body>\n\
         <h1>Luck</h1>\n\
         <p data-result=\"{}\">{verdict}</p>\n\
         </body>\n\
         </html>\n",
        context.result
    )
}

/// A rendered response together with the context it was rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub context: LuckContext,
    pub template: Template,
    pub body: String,
}

impl Response {
    pub fn render(context: LuckContext, template: Template) -> Result<Self, RenderError> {
        let body = template.render(&context)?;
        Ok(Self {
            context,
            template,
            body,
        })
    }

    pub fn content_type(&self) -> &'static str {
        self.template.content_type()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_json_is_exactly_the_context() {
        for result in [true, false] {
            let body = Template::Json.render(&LuckContext { result }).unwrap();
            assert_eq!(body, format!("{{\"result\":{result}}}"));
            let parsed: LuckContext = serde_json::from_str(&body).unwrap();
            assert_eq!(parsed.result, result);
        }
    }

    #[test]
    fn test_every_template_reflects_result() {
        for template in Template::iter() {
            let lucky = template.render(&LuckContext { result: true }).unwrap();
            let unlucky = template.render(&LuckContext { result: false }).unwrap();
            assert_ne!(lucky, unlucky, "{template:?} ignores the result");
            assert!(lucky.contains("true"));
            assert!(unlucky.contains("false"));
        }
    }

    #[test]
    fn test_page() {
        let page = Template::Html.render(&LuckContext { result: true }).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("data-result=\"true\""));
        assert!(page.contains("Lucky you!"));
    }

    #[test]
    fn test_template_from_str() {
        assert_eq!("HTML".parse::<Template>().unwrap(), Template::Html);
        assert_eq!(" json ".parse::<Template>().unwrap(), Template::Json);
        assert_eq!("text".parse::<Template>().unwrap(), Template::Plain);
        assert!(matches!(
            "xml".parse::<Template>(),
            Err(SettingsError::UnknownTemplate(s)) if s == "xml"
        ));
    }

    #[test]
    fn test_template_deserializes_like_from_str() {
        for (name, expected) in [
            ("html", Template::Html),
            ("HTML", Template::Html),
            ("Json", Template::Json),
            ("plain", Template::Plain),
            ("text", Template::Plain),
        ] {
            let template: Template = serde_json::from_str(&format!("\"{name}\"")).unwrap();
            assert_eq!(template, expected, "{name}");
        }
        assert!(serde_json::from_str::<Template>("\"xml\"").is_err());

        // Serialization keeps the canonical lowercase names.
        for template in Template::iter() {
            let name = serde_json::to_string(&template).unwrap();
            assert_eq!(serde_json::from_str::<Template>(&name).unwrap(), template);
        }
        assert_eq!(serde_json::to_string(&Template::Plain).unwrap(), "\"plain\"");
    }

    #[test]
    fn test_response_content_type() {
        let response = Response::render(LuckContext { result: false }, Template::Json).unwrap();
        assert_eq!(response.content_type(), "application/json");
        assert_eq!(response.body, "{\"result\":false}");
    }
}
