use crate::error::CodegenError;
use regex::Regex;
use serde::Serialize;
use std::error::Error as _;
use std::fs;
use std::path::PathBuf;
use tera::ast::{Expr, ExprVal, FunctionCall, Node};
use tera::{Context, Template, Tera};

/// Extension of override template files, e.g. `.springwell/templates/entity.tera`
pub const TEMPLATE_EXTENSION: &str = "tera";

/// Variable tera binds to the whole context
const MAGIC_CONTEXT_VARIABLE: &str = "__tera_context";

/// Built-in default templates, embedded at compile time
static BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("entity", include_str!("../templates/entity.tera")),
    ("repository", include_str!("../templates/repository.tera")),
    ("service", include_str!("../templates/service.tera")),
    ("service_impl", include_str!("../templates/service_impl.tera")),
    ("controller", include_str!("../templates/controller.tera")),
    ("dto", include_str!("../templates/dto.tera")),
    ("workflow", include_str!("../templates/workflow.tera")),
    ("workflow_impl", include_str!("../templates/workflow_impl.tera")),
    ("activity", include_str!("../templates/activity.tera")),
    ("activity_impl", include_str!("../templates/activity_impl.tera")),
    ("readme", include_str!("../templates/readme.tera")),
    ("application_yml", include_str!("../templates/application_yml.tera")),
    ("dockerfile", include_str!("../templates/dockerfile.tera")),
    ("compose", include_str!("../templates/compose.tera")),
    ("ci_workflow", include_str!("../templates/ci_workflow.tera")),
    ("helm_chart", include_str!("../templates/helm_chart.tera")),
    ("helm_values", include_str!("../templates/helm_values.tera")),
    ("helm_deployment", include_str!("../templates/helm_deployment.tera")),
    ("helm_service", include_str!("../templates/helm_service.tera")),
    ("helm_helpers", include_str!("../templates/helm_helpers.tera")),
    ("migration_initial", include_str!("../templates/migration_initial.tera")),
    ("migration_temporal", include_str!("../templates/migration_temporal.tera")),
    ("openapi_spec", include_str!("../templates/openapi_spec.tera")),
    ("openapi_generator", include_str!("../templates/openapi_generator.tera")),
    ("entity_mapper", include_str!("../templates/entity_mapper.tera")),
];

/// Look up a built-in default template by name
pub fn builtin_template(name: &str) -> Option<&'static str> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, body)| *body)
}

/// Names of every built-in template
pub fn builtin_template_names() -> impl Iterator<Item = &'static str> {
    BUILTIN_TEMPLATES.iter().map(|(name, _)| *name)
}

/// Where a template body was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Override(PathBuf),
    Builtin,
}

/// Renders named templates, preferring project overrides over built-in defaults
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    override_dir: Option<PathBuf>,
}

impl TemplateRenderer {
    pub fn new(override_dir: Option<PathBuf>) -> Self {
        Self { override_dir }
    }

    /// Renderer that never looks at the filesystem
    pub fn builtin_only() -> Self {
        Self { override_dir: None }
    }

    /// Resolve a template name to its body and origin
    pub fn resolve(&self, name: &str) -> Result<(String, TemplateSource), CodegenError> {
        if let Some(path) = self.override_path(name) {
            if path.is_file() {
                tracing::debug!(template = name, path = %path.display(), "using override template");
                let body = fs::read_to_string(&path)?;
                return Ok((body, TemplateSource::Override(path)));
            }
        }

        match builtin_template(name) {
            Some(body) => {
                tracing::debug!(template = name, "using built-in template");
                Ok((body.to_string(), TemplateSource::Builtin))
            }
            None => Err(CodegenError::TemplateNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Render a template against a prepared context
    pub fn render(&self, name: &str, context: &Context) -> Result<String, CodegenError> {
        let (body, _) = self.resolve(name)?;
        render_body(name, &body, context)
    }

    /// Render a template against any serializable bindings record
    pub fn render_bindings<T: Serialize>(
        &self,
        name: &str,
        bindings: &T,
    ) -> Result<String, CodegenError> {
        let context = Context::from_serialize(bindings).map_err(|e| CodegenError::Render {
            name: name.to_string(),
            message: error_chain(&e),
        })?;
        self.render(name, &context)
    }

    fn override_path(&self, name: &str) -> Option<PathBuf> {
        self.override_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.{}", name, TEMPLATE_EXTENSION)))
    }
}

/// Compile and render one template body.
///
/// Every variable the template reads must be bound, including names only
/// used as conditions, which tera would otherwise treat as false.
pub fn render_body(name: &str, body: &str, context: &Context) -> Result<String, CodegenError> {
    let syntax_error = |e: tera::Error| CodegenError::TemplateSyntax {
        name: name.to_string(),
        message: error_chain(&e),
    };

    let template = Template::new(name, None, body).map_err(syntax_error)?;
    if let Some(placeholder) = Scope::new(context).nodes(&template.ast) {
        return Err(CodegenError::UnboundPlaceholder {
            template: name.to_string(),
            placeholder,
        });
    }

    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_template(name, body).map_err(syntax_error)?;

    tera.render(name, context).map_err(|e| {
        let message = error_chain(&e);
        match unbound_placeholder(&message) {
            Some(placeholder) => CodegenError::UnboundPlaceholder {
                template: name.to_string(),
                placeholder,
            },
            None => CodegenError::Render {
                name: name.to_string(),
                message,
            },
        }
    })
}

/// Flatten a tera error and its sources into one message
fn error_chain(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Variables visible at one point of a template walk
struct Scope<'a> {
    context: &'a Context,
    locals: Vec<String>,
}

impl<'a> Scope<'a> {
    fn new(context: &'a Context) -> Self {
        Self {
            context,
            locals: Vec::new(),
        }
    }

    /// First variable read by `nodes` that is bound neither here nor in the context
    fn nodes(&mut self, nodes: &[Node]) -> Option<String> {
        nodes.iter().find_map(|node| self.node(node))
    }

    fn node(&mut self, node: &Node) -> Option<String> {
        match node {
            Node::VariableBlock(_, expr) => self.expr(expr),
            Node::Set(_, set) => {
                let unbound = self.expr(&set.value);
                self.locals.push(set.key.clone());
                unbound
            }
            Node::FilterSection(_, section, _) => self
                .call_args(&section.filter)
                .or_else(|| self.nodes(&section.body)),
            Node::Block(_, block, _) => self.nodes(&block.body),
            Node::Forloop(_, forloop, _) => {
                if let Some(unbound) = self.expr(&forloop.container) {
                    return Some(unbound);
                }
                let depth = self.locals.len();
                self.locals.push(forloop.value.clone());
                self.locals.extend(forloop.key.clone());
                self.locals.push("loop".to_string());
                let unbound = self.nodes(&forloop.body);
                self.locals.truncate(depth);

                unbound.or_else(|| {
                    forloop
                        .empty_body
                        .as_deref()
                        .and_then(|body| self.nodes(body))
                })
            }
            Node::If(branches, _) => {
                for (_, condition, body) in &branches.conditions {
                    let unbound = self.expr(condition).or_else(|| self.nodes(body));
                    if unbound.is_some() {
                        return unbound;
                    }
                }
                branches
                    .otherwise
                    .as_ref()
                    .and_then(|(_, body)| self.nodes(body))
            }
            _ => None,
        }
    }

    fn expr(&self, expr: &Expr) -> Option<String> {
        self.value(&expr.val)
            .or_else(|| expr.filters.iter().find_map(|filter| self.call_args(filter)))
    }

    fn value(&self, value: &ExprVal) -> Option<String> {
        match value {
            ExprVal::Ident(ident) => self.ident(ident),
            ExprVal::Math(math) => self.expr(&math.lhs).or_else(|| self.expr(&math.rhs)),
            ExprVal::Logic(logic) => self.expr(&logic.lhs).or_else(|| self.expr(&logic.rhs)),
            ExprVal::In(test) => self.expr(&test.lhs).or_else(|| self.expr(&test.rhs)),
            // `is defined` / `is undefined` exist to probe for missing names
            ExprVal::Test(test) if matches!(test.name.as_str(), "defined" | "undefined") => None,
            ExprVal::Test(test) => self
                .ident(&test.ident)
                .or_else(|| test.args.iter().find_map(|arg| self.expr(arg))),
            ExprVal::FunctionCall(call) => self.call_args(call),
            ExprVal::MacroCall(call) => call.args.values().find_map(|arg| self.expr(arg)),
            ExprVal::Array(items) => items.iter().find_map(|item| self.expr(item)),
            ExprVal::StringConcat(concat) => concat.values.iter().find_map(|v| self.value(v)),
            _ => None,
        }
    }

    fn call_args(&self, call: &FunctionCall) -> Option<String> {
        call.args.values().find_map(|arg| self.expr(arg))
    }

    fn ident(&self, ident: &str) -> Option<String> {
        let root = ident.split(['.', '[']).next().unwrap_or(ident);
        let bound = root == MAGIC_CONTEXT_VARIABLE
            || self.locals.iter().any(|local| local == root)
            || self.context.contains_key(root);
        (!bound).then(|| root.to_string())
    }
}

fn unbound_placeholder(message: &str) -> Option<String> {
    let pattern = Regex::new(r"Variable `([^`]+)` not found in context").ok()?;
    pattern
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
