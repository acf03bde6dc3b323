use std::path::Path;

use anyhow::Context;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use docdelta_sdk::{
    Action, AllowedVersions, DiffKind, DiffRequest, DocDelta, DocdeltaConfig, FileDiff, HeadingNode, HeadingType,
    VersionTag,
};
use docdelta_server::DocdeltaServer;

use crate::cli::*;

/// Read when no `--config` is given and the file exists.
const DEFAULT_CONFIG: &str = "docdelta.toml";

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let format = cli.format;
    match cli.command {
        Command::Render(args) => cmd_render(config, args, &format),
        Command::Outline(args) => cmd_outline(config, args, &format),
        Command::Show(args) => cmd_show(config, args, &format),
        Command::Versions => cmd_versions(config, &format),
        Command::Allowed(args) => cmd_allowed(config, args, &format),
        Command::Serve(args) => cmd_serve(config, args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<DocdeltaConfig> {
    let config = match path {
        Some(path) => DocdeltaConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG).is_file() => DocdeltaConfig::load(Path::new(DEFAULT_CONFIG))?,
        None => DocdeltaConfig::default(),
    };
    Ok(config.apply_env()?)
}

fn emit<T: Serialize>(format: &OutputFormat, value: &T, text: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{}", text(value)),
    }
    Ok(())
}

fn read_diff(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn cmd_render(config: DocdeltaConfig, args: FileArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let sdk = DocDelta::from_config(config);
    let response = sdk.render(&read_diff(&args.file)?);
    emit(format, &response.diff, |diffs| format_diffs(diffs))
}

fn cmd_outline(config: DocdeltaConfig, args: FileArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let sdk = DocDelta::from_config(config);
    let response = sdk.render(&read_diff(&args.file)?);
    emit(format, &response.headings, |headings| format_outline(headings))
}

fn cmd_show(config: DocdeltaConfig, args: ShowArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let sdk = DocDelta::from_config(config);
    let request = DiffRequest {
        source: args.source,
        target: args.target,
        kind: if args.combined { DiffKind::Combined } else { DiffKind::Standard },
    };
    let (source, target) = sdk.resolve(&request)?;
    let response = sdk
        .try_diff(&request)
        .with_context(|| format!("no diff for {source} → {target}"))?;

    emit(format, &response, |r| {
        let mut out = format!("{} {} → {}\n\n", "Comparing".bold(), source.yellow(), target.yellow());
        for diff in &r.diff {
            out.push_str(&format!("  {} {}\n", action_label(diff.action), diff.title));
        }
        if !r.headings.is_empty() {
            out.push_str(&format!("\n{}\n", "Outline".bold()));
            out.push_str(&format_outline(&r.headings));
        }
        out
    })
}

fn cmd_versions(config: DocdeltaConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let versions = DocDelta::from_config(config).versions()?;
    emit(format, &versions, |v| format_versions(v))
}

fn cmd_allowed(config: DocdeltaConfig, args: AllowedArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let allowed = DocDelta::from_config(config).allowed_versions(&args.source, &args.target)?;
    emit(format, &allowed, |a: &AllowedVersions| {
        format!(
            "{} (≤ {})\n{}{} (≥ {})\n{}",
            "Source".bold(),
            args.target.yellow(),
            format_versions(&a.source),
            "Target".bold(),
            args.source.yellow(),
            format_versions(&a.target),
        )
    })
}

fn cmd_serve(config: DocdeltaConfig, args: ServeArgs) -> anyhow::Result<()> {
    let mut server_config = config.server.clone();
    if let Some(bind) = args.bind {
        server_config.bind_addr = bind;
    }
    server_config.permissive_cors |= args.cors;

    println!("docdelta server on {} (diffs: {})", server_config.bind_addr.to_string().bold(), config.diff_dir.display());
    let server = DocdeltaServer::new(server_config, DocDelta::from_config(config));
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn action_label(action: Action) -> ColoredString {
    let label = format!("[{}]", action.label());
    match action {
        Action::Add => label.green(),
        Action::Delete => label.red(),
        Action::Rename => label.cyan(),
        Action::Change => label.yellow(),
    }
}

fn format_diffs(diffs: &[FileDiff]) -> String {
    let mut out = String::new();
    for diff in diffs {
        out.push_str(&format!("{} {}\n", action_label(diff.action), diff.title.bold()));
        out.push_str(&diff.content);
        if !diff.content.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

fn format_outline(headings: &[HeadingNode]) -> String {
    fn walk(node: &HeadingNode, depth: usize, out: &mut String) {
        let title = match node.kind {
            HeadingType::Normal => node.title.normal(),
            HeadingType::Inserted => format!("+ {}", node.title).green(),
            HeadingType::Deleted => format!("- {}", node.title).red().strikethrough(),
            HeadingType::Replaced => format!("~ {}", node.title).yellow(),
        };
        out.push_str(&format!("{}{} {}\n", "  ".repeat(depth), title, format!("#{}", node.id).dimmed()));
        for child in &node.children {
            walk(child, depth + 1, out);
        }
    }

    let mut out = String::new();
    for root in headings {
        walk(root, 0, &mut out);
    }
    out
}

fn format_versions(versions: &[VersionTag]) -> String {
    versions
        .iter()
        .map(|v| {
            let marker = if v.latest { " (latest)".green().to_string() } else { String::new() };
            format!("  {:>3}  {}{}\n", v.id, v.name, marker)
        })
        .collect()
}
