//! Turns build outcomes into text for the terminal.

use std::path::PathBuf;

use shading::{BuildError, ProgramHandle, StageKind};

pub fn success(handle: ProgramHandle, stages: &[StageKind]) -> String {
    let names: Vec<&str> = stages.iter().map(|s| s.name()).collect();
    format!("linked program {} ({})", handle.id(), names.join(", "))
}

/// One block per failed stage, naming the file it came from, or the link log.
pub fn failure(err: &BuildError, shaders: &[(StageKind, PathBuf)]) -> String {
    let mut out = String::new();

    let stage_failures = err.stage_failures();
    if !stage_failures.is_empty() {
        for (stage, diagnostic) in stage_failures {
            let file = shaders
                .iter()
                .find(|(kind, _)| *kind == stage)
                .map(|(_, path)| format!(" ({})", path.display()))
                .unwrap_or_default();

            out.push_str(&format!("error: {} stage{} failed to compile:\n", stage, file));
            push_indented(&mut out, diagnostic);
        }
    } else if let Some(diagnostic) = err.link_diagnostic() {
        out.push_str("error: program failed to link:\n");
        push_indented(&mut out, diagnostic);
    } else {
        out.push_str(&format!("error: {}\n", err));
    }

    out
}

fn push_indented(out: &mut String, text: &str) {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        out.push_str("    (the driver gave no details)\n");
    }
    for line in lines {
        out.push_str("    ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
}
