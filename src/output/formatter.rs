//! Output formatters: console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::model::{CompatibilityLevel, MatchOutcome};
use crate::output::report::{Report, ReportBody};
use crate::processing::recommendations::{Priority, ProfileRecommendations};
use crate::processing::{BatchReport, SkillsAnalysis};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting reports
pub trait OutputFormatter {
    fn format_report(&self, report: &Report) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter emitting the engine records as-is
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn level_color(level: CompatibilityLevel) -> Color {
    match level {
        CompatibilityLevel::Excellent => Color::Green,
        CompatibilityLevel::TresBon => Color::BrightGreen,
        CompatibilityLevel::Bon => Color::Yellow,
        CompatibilityLevel::Moyen => Color::BrightYellow,
        CompatibilityLevel::Faible => Color::Red,
        CompatibilityLevel::Erreur => Color::BrightRed,
    }
}

fn job_label(outcome: &MatchOutcome) -> String {
    match outcome.job_id() {
        Some(serde_json::Value::String(id)) => id.clone(),
        Some(id) => id.to_string(),
        None => "-".to_string(),
    }
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "HIGH",
        Priority::Medium => "MEDIUM",
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_level_badge(&self, level: CompatibilityLevel) -> String {
        let badge = level.as_str().to_uppercase();
        if self.use_colors {
            format!("[{}]", badge.color(level_color(level)).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_match(&self, output: &mut String, outcome: &MatchOutcome) {
        output.push_str(&format!(
            "Score total: {:.2}% {}\n",
            outcome.total_score(),
            self.format_level_badge(outcome.compatibility_level())
        ));

        match outcome {
            MatchOutcome::Scored(result) => {
                output.push_str(&self.format_header("Détail des scores", 3));
                for (sub_score, value) in result.detailed_scores.iter() {
                    output.push_str(&format!("  {:<28} {:>6.2}%\n", sub_score.label(), value));
                }
                if self.detailed {
                    output.push_str(&format!(
                        "  Analysé le {}\n",
                        result.analysis_timestamp.format("%Y-%m-%d %H:%M:%S UTC")
                    ));
                }
            }
            MatchOutcome::Failed(failed) => {
                output.push_str(&format!("{} {}\n", self.colorize("Erreur:", Color::Red), failed.error));
            }
        }

        if !outcome.match_reasons().is_empty() {
            output.push_str(&self.format_header("✅ Points forts", 3));
            for reason in outcome.match_reasons() {
                output.push_str(&format!("  • {}\n", self.colorize(reason, Color::Green)));
            }
        }

        if !outcome.recommendations().is_empty() {
            output.push_str(&self.format_header("🎯 Recommandations", 3));
            for recommendation in outcome.recommendations() {
                output.push_str(&format!("  • {}\n", self.colorize(recommendation, Color::Yellow)));
            }
        }
    }

    fn format_batch(&self, output: &mut String, batch: &BatchReport) {
        output.push_str(&format!(
            "Offres analysées: {} | Meilleur score: {:.2}%\n",
            batch.total_analyzed, batch.best_match_score
        ));

        output.push_str(&self.format_header("Classement", 2));
        for (rank, outcome) in batch.matches.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}. {:>6.2}% {} offre {}\n",
                rank + 1,
                outcome.total_score(),
                self.format_level_badge(outcome.compatibility_level()),
                job_label(outcome)
            ));
            if self.detailed {
                if let Some(error) = outcome.error() {
                    output.push_str(&format!("     {}\n", self.colorize(error, Color::BrightBlack)));
                }
                for reason in outcome.match_reasons() {
                    output.push_str(&format!("     + {}\n", reason));
                }
            }
        }
    }

    fn format_skills(&self, output: &mut String, analysis: &SkillsAnalysis) {
        output.push_str(&format!("Compétences détectées: {}\n", analysis.skills_count));
        for skill in &analysis.extracted_skills {
            output.push_str(&format!("  • {}\n", self.colorize(skill, Color::Cyan)));
        }
        if self.detailed {
            output.push_str(&self.format_header("Texte normalisé", 3));
            output.push_str(&format!("{}\n", analysis.processed_text));
        }
    }

    fn format_recommendations(&self, output: &mut String, report: &ProfileRecommendations) {
        let completeness = &report.profile_completeness;
        output.push_str(&format!(
            "Profil complété à {:.1}% ({}/{} champs)\n",
            completeness.percentage, completeness.completed_fields, completeness.total_fields
        ));

        if report.recommendations.is_empty() {
            output.push_str(&self.colorize("Aucune recommandation, profil complet.\n", Color::Green));
            return;
        }

        for (i, rec) in report.recommendations.iter().enumerate() {
            let color = match rec.priority {
                Priority::High => Color::Red,
                Priority::Medium => Color::Yellow,
            };
            output.push_str(&format!(
                "\n{}. {} {}\n   {}\n",
                i + 1,
                self.colorize(&format!("[{}]", priority_label(rec.priority)), color),
                rec.title,
                rec.description
            ));
            for suggestion in &rec.suggestions {
                output.push_str(&format!(
                    "   • {} (demandée {} fois)\n",
                    self.colorize(&suggestion.skill, Color::Cyan),
                    suggestion.demand
                ));
            }
            if let Some(action) = &rec.action {
                output.push_str(&format!("   → {}\n", action));
            }
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut output = String::new();

        let title = match &report.body {
            ReportBody::Match(_) => "Compatibilité candidat / offre",
            ReportBody::Batch(_) => "Classement des offres",
            ReportBody::Skills(_) => "Analyse des compétences",
            ReportBody::Recommendations(_) => "Recommandations de profil",
        };
        output.push_str(&self.format_header(title, 1));

        match &report.body {
            ReportBody::Match(outcome) => self.format_match(&mut output, outcome),
            ReportBody::Batch(batch) => self.format_batch(&mut output, batch),
            ReportBody::Skills(analysis) => self.format_skills(&mut output, analysis),
            ReportBody::Recommendations(recs) => self.format_recommendations(&mut output, recs),
        }

        if self.detailed {
            output.push_str(&format!(
                "\n{} alternance-matcher v{} | {}ms\n",
                self.colorize("ℹ", Color::Blue),
                report.metadata.matcher_version,
                report.metadata.processing_time_ms
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(&report.body)?)
        } else {
            Ok(serde_json::to_string(&report.body)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn format_match(output: &mut String, outcome: &MatchOutcome) {
        output.push_str(&format!(
            "**Score total :** {:.2}% ({})\n\n",
            outcome.total_score(),
            outcome.compatibility_level()
        ));

        match outcome {
            MatchOutcome::Scored(result) => {
                output.push_str("| Critère | Score |\n");
                output.push_str("|---------|-------|\n");
                for (sub_score, value) in result.detailed_scores.iter() {
                    output.push_str(&format!("| {} | {:.2}% |\n", sub_score.label(), value));
                }
                output.push('\n');
            }
            MatchOutcome::Failed(failed) => {
                output.push_str(&format!("> Erreur : {}\n\n", failed.error));
            }
        }

        if !outcome.match_reasons().is_empty() {
            output.push_str("### ✅ Points forts\n\n");
            for reason in outcome.match_reasons() {
                output.push_str(&format!("- {}\n", reason));
            }
            output.push('\n');
        }

        if !outcome.recommendations().is_empty() {
            output.push_str("### 🎯 Recommandations\n\n");
            for recommendation in outcome.recommendations() {
                output.push_str(&format!("- {}\n", recommendation));
            }
            output.push('\n');
        }
    }

    fn format_batch(output: &mut String, batch: &BatchReport) {
        output.push_str(&format!(
            "**Offres analysées :** {} | **Meilleur score :** {:.2}%\n\n",
            batch.total_analyzed, batch.best_match_score
        ));
        output.push_str("| Rang | Offre | Score | Niveau |\n");
        output.push_str("|------|-------|-------|--------|\n");
        for (rank, outcome) in batch.matches.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {:.2}% | {} |\n",
                rank + 1,
                job_label(outcome),
                outcome.total_score(),
                outcome.compatibility_level()
            ));
        }
        output.push('\n');
    }

    fn format_skills(output: &mut String, analysis: &SkillsAnalysis) {
        output.push_str(&format!("**Compétences détectées :** {}\n\n", analysis.skills_count));
        for skill in &analysis.extracted_skills {
            output.push_str(&format!("- `{}`\n", skill));
        }
        output.push_str(&format!("\n**Texte normalisé :** {}\n\n", analysis.processed_text));
    }

    fn format_recommendations(output: &mut String, report: &ProfileRecommendations) {
        output.push_str(&format!(
            "**Complétude du profil :** {:.1}% ({}/{})\n\n",
            report.profile_completeness.percentage,
            report.profile_completeness.completed_fields,
            report.profile_completeness.total_fields
        ));

        for rec in &report.recommendations {
            output.push_str(&format!("### {} ({})\n\n{}\n\n", rec.title, priority_label(rec.priority), rec.description));
            for suggestion in &rec.suggestions {
                output.push_str(&format!("- **{}** : {}\n", suggestion.skill, suggestion.demand));
            }
            if let Some(action) = &rec.action {
                output.push_str(&format!("- {}\n", action));
            }
            output.push('\n');
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("# 📊 Rapport {}\n\n", report.body.kind()));

        if self.include_metadata {
            output.push_str(&format!(
                "**Généré :** {} | **Durée :** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            if !report.metadata.sources.is_empty() {
                let sources: Vec<String> = report
                    .metadata
                    .sources
                    .iter()
                    .map(|s| format!("`{}`", s))
                    .collect();
                output.push_str(&format!("**Sources :** {}\n", sources.join(", ")));
            }
            output.push('\n');
        }

        match &report.body {
            ReportBody::Match(outcome) => Self::format_match(&mut output, outcome),
            ReportBody::Batch(batch) => Self::format_batch(&mut output, batch),
            ReportBody::Skills(analysis) => Self::format_skills(&mut output, analysis),
            ReportBody::Recommendations(recs) => Self::format_recommendations(&mut output, recs),
        }

        output.push_str(&format!(
            "---\n*Généré par alternance-matcher v{}*\n",
            report.metadata.matcher_version
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &Report, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, source_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(source_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_match{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_match{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_match{}.md", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DetailedScores, FailedMatch, ScoreResult, SubScore};
    use chrono::Utc;

    fn scored_report() -> Report {
        let outcome = MatchOutcome::Scored(ScoreResult {
            total_score: 72.0,
            detailed_scores: DetailedScores {
                technical_skills: 100.0,
                personality: 50.0,
                location: 90.0,
                soft_skills: 0.0,
                preferences: 50.0,
                education: 100.0,
            },
            compatibility_level: CompatibilityLevel::TresBon,
            match_reasons: vec!["Localisation idéale".to_string()],
            recommendations: Vec::new(),
            analysis_timestamp: Utc::now(),
            job_id: None,
        });
        Report::new(ReportBody::Match(outcome), vec!["profile.json".to_string()], 1)
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, false)
            .format_report(&scored_report())
            .unwrap();

        assert!(output.contains("Score total: 72.00% [TRÈS BON]"));
        assert!(output.contains(SubScore::Location.label()));
        assert!(output.contains("• Localisation idéale"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_json_keeps_record_layout() {
        let output = JsonFormatter::new(false).format_report(&scored_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["total_score"], 72.0);
        assert_eq!(value["compatibility_level"], "Très bon");
        assert_eq!(value["detailed_scores"]["location"], 90.0);
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn test_markdown_batch_table() {
        let failed = MatchOutcome::Failed(FailedMatch::new("invalid offer"))
            .with_job_id(Some(serde_json::json!("job-7")));
        let batch = BatchReport {
            matches: vec![failed],
            total_analyzed: 1,
            best_match_score: 0.0,
        };
        let report = Report::new(ReportBody::Batch(batch), Vec::new(), 0);

        let output = MarkdownFormatter::new(false).format_report(&report).unwrap();
        assert!(output.starts_with("# 📊 Rapport batch"));
        assert!(output.contains("| 1 | job-7 | 0.00% | Erreur |"));
        assert!(!output.contains("**Généré :**"));
    }

    #[test]
    fn test_generator_dispatch_and_save() {
        let generator = ReportGenerator::with_options(false, true, true, true);
        let report = scored_report();

        for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Markdown] {
            assert!(!generator.generate_report(&report, &format).unwrap().is_empty());
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.md");
        save_report_to_file("# ok", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# ok");
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Json, "data/profil.json", false),
            "profil_match.json"
        );
        assert!(suggest_filename(&OutputFormat::Markdown, "profil", true).ends_with(".md"));
    }
}
