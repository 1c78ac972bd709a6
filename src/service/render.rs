//! Derives a job script body from an application's stored file content.

/// Inject `#SBATCH` directive lines into a script, directly below the
/// shebang and any directive block already present, so the scheduler
/// still reads them before the first command.
pub fn inject_sbatch_params(script: &str, params: &[String]) -> String {
    if params.is_empty() {
        return script.to_string();
    }

    let mut lines: Vec<String> = script.lines().map(str::to_owned).collect();

    let mut insert_at = 0;
    if lines.first().is_some_and(|l| l.starts_with("#!")) {
        insert_at = 1;
    }
    while lines
        .get(insert_at)
        .is_some_and(|l| l.trim_start().starts_with("#SBATCH"))
    {
        insert_at += 1;
    }

    for (offset, param) in params.iter().enumerate() {
        lines.insert(insert_at + offset, format!("#SBATCH {param}"));
    }

    let mut rendered = lines.join("\n");
    if script.ends_with('\n') {
        rendered.push('\n');
    }
    rendered
}
