//! Parameter type translation.
//!
//! Operation parameters are split into three object types (path, query and
//! body). A kind that received no parameters is reported as `undefined`.

// Internal imports (std, crate)
use std::fmt;

use crate::{
    error::Result,
    options::BodyParamPolicy,
    swagger::{Parameter, ParameterLocation},
    translate::{Translator, UNDEFINED, UNKNOWN},
    utils::{doc_comment, property_key, quoted},
};

/// Formats that make a non-body parameter numeric
const NUMERIC_FORMATS: [&str; 4] = ["int32", "int64", "uint32", "uint64"];

/// Runtime type of a path or query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    String,
    Number,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Parameter {
    /// `number` for the integer formats, `string` for everything else
    pub fn primitive_type(&self) -> PrimitiveType {
        match self.format.as_deref() {
            Some(format) if NUMERIC_FORMATS.contains(&format) => PrimitiveType::Number,
            _ => PrimitiveType::String,
        }
    }
}

/// Path, query and body parameter types of one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTypes {
    pub path: String,
    pub query: String,
    pub body: String,
}

impl Default for ParamTypes {
    fn default() -> Self {
        Self {
            path: UNDEFINED.to_string(),
            query: UNDEFINED.to_string(),
            body: UNDEFINED.to_string(),
        }
    }
}

/// Lines of one object type under construction
#[derive(Default)]
struct Accumulator {
    lines: String,
}

impl Accumulator {
    fn push(&mut self, comment: Option<&str>, entry: String) {
        if let Some(comment) = comment {
            self.lines.push_str(comment);
            self.lines.push('\n');
        }
        self.lines.push_str(&entry);
        self.lines.push('\n');
    }

    fn finish(self) -> String {
        if self.lines.is_empty() {
            UNDEFINED.to_string()
        } else {
            format!("{{\n{}}}", self.lines)
        }
    }
}

/// Translate an operation's parameters into path, query and body types
pub fn translate_parameters(
    translator: &Translator<'_>,
    params: Option<&[Parameter]>,
    body_policy: BodyParamPolicy,
) -> Result<ParamTypes> {
    let Some(params) = params else {
        return Ok(ParamTypes::default());
    };

    let mut path = Accumulator::default();
    let mut query = Accumulator::default();
    let mut body = Accumulator::default();

    for param in params {
        let comment = doc_comment(param.description.as_deref());
        let comment = comment.as_deref();

        match &param.location {
            ParameterLocation::Path => path.push(
                comment,
                format!("{}: {}", property_key(&param.name), param.primitive_type()),
            ),
            ParameterLocation::Query => query.push(
                comment,
                format!("{}: {}", property_key(&param.name), param.primitive_type()),
            ),
            ParameterLocation::Body => {
                let ty = match &param.schema {
                    Some(schema) => translator.translate_ref_or_schema(schema)?,
                    None => UNKNOWN.to_string(),
                };
                let entry = format!("{}: {}", quoted(&param.name), ty);
                match body_policy {
                    BodyParamPolicy::Query => query.push(comment, entry),
                    BodyParamPolicy::Body => body.push(comment, entry),
                }
            }
            ParameterLocation::Unsupported(location) => {
                log::warn!(
                    "Ignoring parameter '{}' with unsupported location '{}'",
                    param.name,
                    location
                );
            }
        }
    }

    Ok(ParamTypes {
        path: path.finish(),
        query: query.finish(),
        body: body.finish(),
    })
}

/// Replace `{name}` placeholders of path parameters with `${type}` interpolations
pub fn endpoint_template(path: &str, params: Option<&[Parameter]>) -> String {
    let mut template = path.to_string();
    for param in params
        .unwrap_or_default()
        .iter()
        .filter(|p| p.location == ParameterLocation::Path)
    {
        template = template.replacen(
            &format!("{{{}}}", param.name),
            &format!("${{{}}}", param.primitive_type()),
            1,
        );
    }
    template
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{options::RefPolicy, swagger::SourceDocument};
    use serde_json::{Value as JsonValue, json};

    fn params(value: JsonValue) -> Vec<Parameter> {
        serde_json::from_value(value).unwrap()
    }

    fn param_with_format(format: Option<&str>) -> Parameter {
        Parameter {
            name: "p".into(),
            location: ParameterLocation::Query,
            description: None,
            required: None,
            param_type: Some("string".into()),
            format: format.map(String::from),
            schema: None,
        }
    }

    #[test]
    fn test_primitive_type_is_total() {
        for format in ["int32", "int64", "uint32", "uint64"] {
            assert_eq!(
                param_with_format(Some(format)).primitive_type(),
                PrimitiveType::Number
            );
        }
        for format in [None, Some("byte"), Some("date-time"), Some("boolean"), Some("")] {
            assert_eq!(
                param_with_format(format).primitive_type(),
                PrimitiveType::String
            );
        }
    }

    #[test]
    fn test_no_parameters() {
        let doc = SourceDocument::default();
        let translator = Translator::new(&doc, RefPolicy::Legacy);
        let none = translate_parameters(&translator, None, BodyParamPolicy::Query).unwrap();
        assert_eq!(none, ParamTypes::default());
        let empty = translate_parameters(&translator, Some(&[][..]), BodyParamPolicy::Query).unwrap();
        assert_eq!(empty.path, "undefined");
        assert_eq!(empty.query, "undefined");
        assert_eq!(empty.body, "undefined");
    }

    #[test]
    fn test_path_and_query_routing() {
        let doc = SourceDocument::default();
        let translator = Translator::new(&doc, RefPolicy::Legacy);
        let list = params(json!([
            {"name": "height", "in": "path", "format": "int64", "description": "block height"},
            {"name": "denom", "in": "path"},
            {"name": "pagination.limit", "in": "query", "format": "uint64"},
            {"name": "X-Trace", "in": "header"}
        ]));
        let types = translate_parameters(&translator, Some(list.as_slice()), BodyParamPolicy::Query).unwrap();
        assert_eq!(
            types.path,
            "{\n/** block height */\nheight: number\ndenom: string\n}"
        );
        assert_eq!(types.query, "{\n'pagination.limit': number\n}");
        assert_eq!(types.body, "undefined");
    }

    #[test]
    fn test_body_policies() {
        let doc = SourceDocument::default();
        let translator = Translator::new(&doc, RefPolicy::Legacy);
        let list = params(json!([
            {"name": "body", "in": "body", "description": "request", "schema": {"type": "object", "properties": {"tx_bytes": {"type": "string"}}}},
            {"name": "raw", "in": "body"}
        ]));

        let legacy = translate_parameters(&translator, Some(list.as_slice()), BodyParamPolicy::Query).unwrap();
        assert_eq!(
            legacy.query,
            "{\n/** request */\n'body': {\ntx_bytes: string\n}\n'raw': unknown\n}"
        );
        assert_eq!(legacy.body, "undefined");

        let separate = translate_parameters(&translator, Some(list.as_slice()), BodyParamPolicy::Body).unwrap();
        assert_eq!(separate.query, "undefined");
        assert_eq!(separate.body, legacy.query);
    }

    #[test]
    fn test_endpoint_template() {
        let list = params(json!([
            {"name": "height", "in": "path", "format": "int64"},
            {"name": "address", "in": "path"},
            {"name": "denom", "in": "query"}
        ]));
        assert_eq!(
            endpoint_template("/blocks/{height}/balances/{address}/{denom}", Some(list.as_slice())),
            "/blocks/${number}/balances/${string}/{denom}"
        );
        assert_eq!(endpoint_template("/health", None), "/health");
    }
}
