use std::fmt::Write as FmtWrite;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use formui::definition::{FormDefinition, definition_schema, load_definition_value};
use formui::form::FormElement;
use formui::host::{ControlKind, HostForm};
use formui::io::{
    DocumentFormat, OutputDestination, OutputOptions, emit, emit_text, parse_document_any,
};
use formui::vdom::to_html;

const LOG_ENV: &str = "FORMUI_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "formui",
    version,
    about = "Render declarative form definitions and simulate submitting them"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a form definition as HTML
    Render {
        /// Form definition: file path, inline payload, or "-" for stdin
        #[arg(value_name = "SPEC")]
        spec: String,

        /// Print the virtual node tree as JSON instead of HTML
        #[arg(long = "tree")]
        tree: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the JSON Schema that form definitions are validated against
    Schema {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Fill in a form definition, submit it and print the submitted data
    Submit {
        /// Form definition: file path, inline payload, or "-" for stdin
        #[arg(value_name = "SPEC")]
        spec: String,

        /// Field value as name=value; checkboxes take true/false
        #[arg(short = 's', long = "set", value_name = "NAME=VALUE", action = ArgAction::Append)]
        values: Vec<String>,

        /// Print application/x-www-form-urlencoded data instead of a document
        #[arg(long = "urlencoded")]
        urlencoded: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Output destinations ("-" writes to stdout). Accepts multiple values per flag use.
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Overwrite output files even if they already exist
    #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
    force: bool,
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Render { spec, tree, output } => render(&spec, tree, &output),
        Command::Schema { output } => schema(&output),
        Command::Submit {
            spec,
            values,
            urlencoded,
            output,
        } => submit(&spec, &values, urlencoded, &output),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn render(spec: &str, tree: bool, output: &OutputArgs) -> Result<()> {
    let mut diagnostics = DiagnosticCollector::default();
    let hint = resolve_format_hint(spec, "definition", &mut diagnostics);
    let definition = load_definition(spec, hint, &mut diagnostics);
    let destinations = build_destinations(output, &mut diagnostics);
    ensure_output_paths_available(&destinations, output.force, &mut diagnostics);
    diagnostics.into_result()?;

    let host = mount(definition)?;
    let payload = if tree {
        let node = host.render().resolve();
        if output.no_pretty {
            serde_json::to_string(&node)?
        } else {
            serde_json::to_string_pretty(&node)?
        }
    } else {
        to_html(&host.render())
    };
    emit_text(&payload, &destinations).map_err(Report::msg)
}

fn schema(output: &OutputArgs) -> Result<()> {
    let mut diagnostics = DiagnosticCollector::default();
    let options = build_output_options(output, None, &mut diagnostics);
    ensure_output_paths_available(&options.destinations, output.force, &mut diagnostics);
    diagnostics.into_result()?;
    emit(&definition_schema(), &options).map_err(Report::msg)
}

fn submit(spec: &str, values: &[String], urlencoded: bool, output: &OutputArgs) -> Result<()> {
    let mut diagnostics = DiagnosticCollector::default();
    let hint = resolve_format_hint(spec, "definition", &mut diagnostics);
    let definition = load_definition(spec, hint, &mut diagnostics);
    let assignments = parse_assignments(values, &mut diagnostics);
    let options = build_output_options(output, hint.extension_value(), &mut diagnostics);
    ensure_output_paths_available(&options.destinations, output.force, &mut diagnostics);
    diagnostics.into_result()?;

    let mut host = mount(definition)?;
    for (name, value) in &assignments {
        fill(&mut host, name, value).wrap_err_with(|| format!("failed to set '{name}'"))?;
    }

    let outcome = host.submit();
    let Some(data) = outcome.data() else {
        let errors = host.errors();
        for (name, message) in &errors {
            eprintln!("{name}: {message}");
        }
        return Err(eyre!(
            "form submission rejected: {} invalid field(s)",
            errors.len()
        ));
    };

    if urlencoded {
        emit_text(&host.form_data().to_urlencoded(), &options.destinations)
            .map_err(Report::msg)
    } else {
        emit(data, &options).map_err(Report::msg)
    }
}

fn mount(definition: Option<FormDefinition>) -> Result<HostForm> {
    let definition = definition.ok_or_else(|| eyre!("no form definition loaded"))?;
    Ok(definition.mount()?)
}

/// Text controls get an input event, checkboxes and selects a change.
fn fill(host: &mut HostForm, name: &str, value: &str) -> Result<()> {
    let kind = host
        .control(name)
        .map(|control| control.kind().clone())
        .ok_or_else(|| eyre!("no field named '{name}'"))?;
    match kind {
        ControlKind::Select => host.select(name, value)?,
        kind if kind.is_checkbox() => host.set_checked(name, parse_flag(value)?)?,
        _ => host.input(name, value)?,
    }
    Ok(())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" | "" => Ok(false),
        other => Err(eyre!("expected true or false, found '{other}'")),
    }
}

fn parse_assignments(
    values: &[String],
    diagnostics: &mut DiagnosticCollector,
) -> Vec<(String, String)> {
    values
        .iter()
        .filter_map(|raw| match raw.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Some((name.trim().to_string(), value.to_string()))
            }
            _ => {
                diagnostics.push_input("set", format!("expected NAME=VALUE, found '{raw}'"));
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct FormatHint {
    format: DocumentFormat,
    from_extension: bool,
}

impl Default for FormatHint {
    fn default() -> Self {
        Self {
            format: DocumentFormat::default(),
            from_extension: false,
        }
    }
}

impl FormatHint {
    fn extension_value(&self) -> Option<DocumentFormat> {
        self.from_extension.then_some(self.format)
    }
}

fn resolve_format_hint(
    spec: &str,
    label: &str,
    diagnostics: &mut DiagnosticCollector,
) -> FormatHint {
    if spec == "-" {
        return FormatHint::default();
    }
    match probe_format_from_extension(Path::new(spec)) {
        ExtensionFormat::Known(format) => FormatHint {
            format,
            from_extension: true,
        },
        ExtensionFormat::UnsupportedFeature {
            format_name,
            feature_flag,
        } => {
            diagnostics.push_input(
                label,
                format!(
                    "{label} '{spec}' requires {format_name} support, but this build lacks the '{feature_flag}' feature"
                ),
            );
            FormatHint::default()
        }
        ExtensionFormat::Unknown => FormatHint::default(),
    }
}

fn load_definition(
    spec: &str,
    hint: FormatHint,
    diagnostics: &mut DiagnosticCollector,
) -> Option<FormDefinition> {
    let label = "definition";
    let value = match load_value(spec, hint.format, label) {
        Ok(value) => value,
        Err(err) => {
            diagnostics.push_input(label, err.to_string());
            return None;
        }
    };
    match load_definition_value(value) {
        Ok(definition) => Some(definition),
        Err(err) => {
            diagnostics.push_input(label, format!("{err:#}"));
            None
        }
    }
}

fn load_value(spec: &str, format: DocumentFormat, label: &str) -> Result<Value> {
    if spec == "-" {
        let contents = read_from_source(&InputSource::Stdin)?;
        return parse_contents(&contents, format, label);
    }

    let path = PathBuf::from(spec);
    match read_from_source(&InputSource::File(path.clone())) {
        Ok(contents) => parse_contents(&contents, format, label),
        Err(err) => {
            if is_not_found(&err) {
                let inline_label = format!("inline {label}");
                return parse_contents(spec, format, &inline_label);
            }
            Err(err.wrap_err(format!("failed to load {label} from {}", path.display())))
        }
    }
}

fn read_from_source(source: &InputSource) -> Result<String> {
    match source {
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("failed to read from stdin")?;
            Ok(buffer)
        }
        InputSource::File(path) => fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read file {}", path.display())),
    }
}

fn is_not_found(err: &Report) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|io_err| io_err.kind() == io::ErrorKind::NotFound)
}

fn parse_contents(contents: &str, format: DocumentFormat, label: &str) -> Result<Value> {
    parse_document_any(contents, format).map_err(|primary| {
        eyre!(
            "failed to parse {label}: tried {} (first error: {primary})",
            format_list()
        )
    })
}

fn format_list() -> String {
    let items: Vec<String> = DocumentFormat::available_formats()
        .into_iter()
        .map(|fmt| fmt.to_string())
        .collect();
    items.join(", ")
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, label: &str, message: impl Into<String>) {
        self.messages
            .push(format!("input ({label}): {}", message.into()));
    }

    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input/output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}

/// Stdout unless destinations were given.
fn build_destinations(
    output: &OutputArgs,
    diagnostics: &mut DiagnosticCollector,
) -> Vec<OutputDestination> {
    let mut destinations = Vec::new();
    for raw in &output.outputs {
        if raw.trim().is_empty() {
            diagnostics.push_output("output destination cannot be empty");
        } else if raw == "-" {
            destinations.push(OutputDestination::Stdout);
        } else {
            destinations.push(OutputDestination::file(raw));
        }
    }
    if destinations.is_empty() {
        destinations.push(OutputDestination::Stdout);
    }
    destinations
}

fn build_output_options(
    output: &OutputArgs,
    input_hint: Option<DocumentFormat>,
    diagnostics: &mut DiagnosticCollector,
) -> OutputOptions {
    let destinations = build_destinations(output, diagnostics);
    let file_paths: Vec<PathBuf> = destinations
        .iter()
        .filter_map(|dest| match dest {
            OutputDestination::File(path) => Some(path.clone()),
            OutputDestination::Stdout => None,
        })
        .collect();

    let format = if file_paths.is_empty() {
        input_hint.unwrap_or_default()
    } else {
        infer_format_from_files(&file_paths, diagnostics).unwrap_or_default()
    };

    OutputOptions::new(format)
        .with_pretty(!output.no_pretty)
        .with_destinations(destinations)
}

fn infer_format_from_files(
    file_paths: &[PathBuf],
    diagnostics: &mut DiagnosticCollector,
) -> Option<DocumentFormat> {
    let mut detected: Option<DocumentFormat> = None;
    for path in file_paths {
        match probe_format_from_extension(path) {
            ExtensionFormat::Known(format) => {
                if let Some(existing) = detected {
                    if existing != format {
                        diagnostics.push_output(format!(
                            "output file {} uses {format} but other destinations use {existing}; align extensions",
                            path.display()
                        ));
                    }
                } else {
                    detected = Some(format);
                }
            }
            ExtensionFormat::UnsupportedFeature {
                format_name,
                feature_flag,
            } => diagnostics.push_output(format!(
                "output file {} requires {format_name} support, but this build was compiled without the '{feature_flag}' feature",
                path.display()
            )),
            ExtensionFormat::Unknown => diagnostics.push_output(format!(
                "cannot infer format from output file {}; use .json/.yaml/.toml",
                path.display()
            )),
        }
    }
    detected
}

fn probe_format_from_extension(path: &Path) -> ExtensionFormat {
    if let Some(format) = DocumentFormat::from_extension(path) {
        return ExtensionFormat::Known(format);
    }
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
    match ext.as_deref() {
        #[cfg(not(feature = "yaml"))]
        Some("yaml" | "yml") => ExtensionFormat::UnsupportedFeature {
            format_name: "yaml",
            feature_flag: "yaml",
        },
        #[cfg(not(feature = "toml"))]
        Some("toml") => ExtensionFormat::UnsupportedFeature {
            format_name: "toml",
            feature_flag: "toml",
        },
        _ => ExtensionFormat::Unknown,
    }
}

#[derive(Debug)]
enum ExtensionFormat {
    Known(DocumentFormat),
    #[allow(dead_code)]
    UnsupportedFeature {
        format_name: &'static str,
        feature_flag: &'static str,
    },
    Unknown,
}

fn ensure_output_paths_available(
    destinations: &[OutputDestination],
    force: bool,
    diagnostics: &mut DiagnosticCollector,
) {
    if force {
        return;
    }
    for destination in destinations {
        if let OutputDestination::File(path) = destination
            && path.exists()
        {
            diagnostics.push_output(format!(
                "file {} already exists (pass --force to overwrite)",
                path.display()
            ));
        }
    }
}
