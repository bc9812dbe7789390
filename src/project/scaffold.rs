//! Directory layout and starter files for a new project.

use std::fs;
use std::path::{Path, PathBuf};

use super::template::Template;

const FLASK_APP: &str = r#"from flask import Flask, jsonify

app = Flask(__name__)


@app.route("/")
def index():
    return jsonify({"message": "Hello from the backend!"})


if __name__ == "__main__":
    app.run(debug=True)
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>WebApp</title></head>
<body>
<h1>Welcome to your new web app</h1>
<div id="app"></div>
<script>// frontend code goes here</script>
</body>
</html>
"#;

const CLI_MAIN: &str = r#"#!/usr/bin/env python3
import argparse


def main():
    parser = argparse.ArgumentParser(description="CLI tool")
    parser.add_argument("--name", help="who to greet")
    args = parser.parse_args()
    print(f"Hello {args.name or 'world'}!")


if __name__ == "__main__":
    main()
"#;

const PIPELINE_MAIN: &str = r#"#!/usr/bin/env python3


def extract():
    return []


def transform(data):
    return data


def load(data):
    pass


def main():
    load(transform(extract()))


if __name__ == "__main__":
    main()
"#;

const SERVICE_STUB: &str = r#"#!/usr/bin/env python3

# Placeholder for the first microservice.
# Implement it with Flask, FastAPI or any other framework.
"#;

/// Starter files for a template, relative to the project root.
pub fn starter_files(template: Template) -> &'static [(&'static str, &'static str)] {
    match template {
        Template::WebApp => &[
            ("src/backend/app.py", FLASK_APP),
            ("src/frontend/index.html", INDEX_HTML),
        ],
        Template::CliTool => &[("src/cli_tool/main.py", CLI_MAIN)],
        Template::DataPipeline => &[("src/pipeline/main.py", PIPELINE_MAIN)],
        Template::Microservices => &[("src/services/service1.py", SERVICE_STUB)],
        _ => &[],
    }
}

/// Create `src/`, `tests/` and the template's starter files.
///
/// Existing files are left alone. Each failure is logged and the remaining
/// entries are still attempted. Returns the files that were written.
pub fn scaffold(project_dir: &Path, template: Option<Template>) -> Vec<PathBuf> {
    for dir in ["src", "tests"] {
        if let Err(e) = fs::create_dir_all(project_dir.join(dir)) {
            tracing::warn!("Could not create {}/{}: {}", project_dir.display(), dir, e);
        }
    }

    let Some(template) = template else {
        return Vec::new();
    };

    let mut written = Vec::new();
    for (relative, content) in starter_files(template) {
        let path = project_dir.join(relative);
        if path.exists() {
            tracing::debug!("Keeping existing {}", path.display());
            continue;
        }
        let result = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| fs::write(&path, content));
        match result {
            Ok(()) => written.push(path),
            Err(e) => tracing::warn!("Could not write {}: {}", path.display(), e),
        }
    }
    written
}
