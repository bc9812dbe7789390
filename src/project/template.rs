//! Closed set of project templates and the workflow steps each one adds.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Agile,
    Ddd,
    HighPerformance,
    Cicd,
    WebApp,
    CliTool,
    DataPipeline,
    Microservices,
}

/// One extra facade call issued for a template after the lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateStep {
    /// `sparc run MODE TASK --parallel [--batch-optimize]`
    Sparc {
        mode: &'static str,
        task: String,
        batch_optimize: bool,
    },
    /// Release with an auto-generated changelog.
    Release { version: &'static str },
    /// AI-powered pull request management.
    PullRequests,
}

impl TemplateStep {
    fn sparc(mode: &'static str, task: String) -> Self {
        TemplateStep::Sparc {
            mode,
            task,
            batch_optimize: false,
        }
    }
}

impl Template {
    pub const ALL: [Template; 8] = [
        Template::Agile,
        Template::Ddd,
        Template::HighPerformance,
        Template::Cicd,
        Template::WebApp,
        Template::CliTool,
        Template::DataPipeline,
        Template::Microservices,
    ];

    /// Match a tag after lower-casing it. Spelling variants such as
    /// `web-app` are not recognised.
    pub fn from_tag(tag: &str) -> Option<Template> {
        match tag.to_lowercase().as_str() {
            "agile" => Some(Template::Agile),
            "ddd" => Some(Template::Ddd),
            "highperformance" => Some(Template::HighPerformance),
            "cicd" => Some(Template::Cicd),
            "webapp" => Some(Template::WebApp),
            "cli-tool" => Some(Template::CliTool),
            "datapipeline" => Some(Template::DataPipeline),
            "microservices" => Some(Template::Microservices),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Template::Agile => "agile",
            Template::Ddd => "ddd",
            Template::HighPerformance => "highperformance",
            Template::Cicd => "cicd",
            Template::WebApp => "webapp",
            Template::CliTool => "cli-tool",
            Template::DataPipeline => "datapipeline",
            Template::Microservices => "microservices",
        }
    }

    /// Spelling shown in menus.
    pub fn display_name(&self) -> &'static str {
        match self {
            Template::Agile => "Agile",
            Template::Ddd => "DDD",
            Template::HighPerformance => "HighPerformance",
            Template::Cicd => "CICD",
            Template::WebApp => "WebApp",
            Template::CliTool => "CLI-Tool",
            Template::DataPipeline => "DataPipeline",
            Template::Microservices => "Microservices",
        }
    }

    /// Extra workflow calls for `feature`, in issue order.
    pub fn steps(&self, feature: &str) -> Vec<TemplateStep> {
        match self {
            Template::Agile => vec![TemplateStep::Sparc {
                mode: "agile",
                task: format!("plan and implement {}", feature),
                batch_optimize: true,
            }],
            Template::Ddd => vec![
                TemplateStep::sparc("ddd", format!("model domain for {}", feature)),
                TemplateStep::sparc("architecture", format!("refine architecture for {}", feature)),
            ],
            Template::HighPerformance => vec![
                TemplateStep::sparc("performance", format!("optimize performance for {}", feature)),
                TemplateStep::sparc("testing", format!("load test {}", feature)),
            ],
            Template::Cicd => vec![
                TemplateStep::sparc("ci-cd", format!("build, test, and deploy {}", feature)),
                TemplateStep::Release { version: "0.1.0" },
                TemplateStep::PullRequests,
            ],
            Template::WebApp => vec![
                TemplateStep::sparc("api-design", format!("design REST API for {}", feature)),
                TemplateStep::sparc("frontend", format!("create frontend for {}", feature)),
                TemplateStep::sparc("backend", format!("create backend for {}", feature)),
            ],
            Template::CliTool => vec![TemplateStep::sparc(
                "cli-tool",
                format!("implement CLI tool for {}", feature),
            )],
            Template::DataPipeline => vec![TemplateStep::sparc(
                "data-pipeline",
                format!("build data pipeline for {}", feature),
            )],
            Template::Microservices => vec![TemplateStep::sparc(
                "microservices-split",
                format!("split {} into microservices", feature),
            )],
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Template {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::from_tag(s).ok_or_else(|| {
            let valid: Vec<_> = Template::ALL.iter().map(|t| t.tag()).collect();
            anyhow::anyhow!("Invalid template '{}'. Valid values: {}", s, valid.join(", "))
        })
    }
}

/// What an optional template tag given with a project resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateChoice<'a> {
    Absent,
    Known(Template),
    Unknown(&'a str),
}

impl<'a> TemplateChoice<'a> {
    pub fn resolve(tag: Option<&'a str>) -> Self {
        match tag {
            None => TemplateChoice::Absent,
            Some(tag) => match Template::from_tag(tag) {
                Some(template) => TemplateChoice::Known(template),
                None => TemplateChoice::Unknown(tag),
            },
        }
    }

    pub fn template(&self) -> Option<Template> {
        match self {
            TemplateChoice::Known(template) => Some(*template),
            _ => None,
        }
    }

    /// Line logged for a tag that matches no template.
    pub fn notice(&self) -> Option<String> {
        match self {
            TemplateChoice::Unknown(tag) => {
                Some(format!("Unknown template '{}', no extra steps are run", tag))
            }
            _ => None,
        }
    }
}

/// Suggest a template from keywords in the idea. Rules are checked in order.
pub fn infer_template(idea: &str) -> Option<Template> {
    let text = idea.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

    if has(&["web", "frontend", "backend"]) {
        Some(Template::WebApp)
    } else if has(&["cli", "console", "terminal"]) {
        Some(Template::CliTool)
    } else if has(&["data", "pipeline"]) {
        Some(Template::DataPipeline)
    } else if has(&["microservice"]) {
        Some(Template::Microservices)
    } else {
        None
    }
}
