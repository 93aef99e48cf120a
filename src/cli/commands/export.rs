//! Export command: write the routes passing the filters as GPX

use super::shared::{CommandStats, build_session, format_duration, session_stats};
use crate::Result;
use crate::app::services::gpx_export::save_gpx;
use crate::cli::args::{Args, ExportArgs};
use crate::config::Config;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// Export command runner
///
/// # Errors
/// * `Error::NothingToExport` if no route passes the filters; no file is written
pub async fn run_export(args: &Args, export: ExportArgs, config: &Config) -> Result<CommandStats> {
    let start_time = Instant::now();
    debug!("Export arguments: {:?}", export);
    export.validate()?;

    let session = build_session(config, &export.filters, args.show_progress()).await?;
    let document = session.export_gpx()?;

    let output = export
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.export_file_name));
    save_gpx(&output, &document).await?;

    let mut stats = session_stats(&session);
    stats.processing_time = start_time.elapsed();

    info!(
        "Exported {} routes to {}",
        stats.routes_visible,
        output.display()
    );

    if !args.quiet {
        println!(
            "{} {} routes to {} in {}",
            "Exported".green().bold(),
            stats.routes_visible,
            output.display(),
            format_duration(stats.processing_time)
        );
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::cli::args::FilterArgs;
    use clap::Parser;
    use tempfile::TempDir;

    fn write_france(dir: &std::path::Path) {
        std::fs::write(
            dir.join("France.json"),
            r#"[{"title": "Col & Vars", "road_type_name": "Mountain", "rating": 4.5, "polyline": "_ibE_seK_seK_seK"}]"#,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_export_writes_gpx() {
        let temp_dir = TempDir::new().unwrap();
        write_france(temp_dir.path());
        let output = temp_dir.path().join("out.gpx");

        let args = Args::parse_from(["route-browser", "-q", "export"]);
        let export = ExportArgs {
            filters: FilterArgs {
                countries: Some("France".parse().unwrap()),
                ..Default::default()
            },
            output: Some(output.clone()),
        };
        let config = Config::default().with_data_dir(temp_dir.path());

        let stats = run_export(&args, export, &config).await.unwrap();
        assert_eq!(stats.routes_visible, 1);

        let gpx = std::fs::read_to_string(&output).unwrap();
        assert!(gpx.contains("<name>Col &amp; Vars</name>"));
        assert_eq!(gpx.matches("<trkpt").count(), 2);
    }

    #[tokio::test]
    async fn test_export_without_countries_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        write_france(temp_dir.path());
        let output = temp_dir.path().join("out.gpx");

        let args = Args::parse_from(["route-browser", "-q", "export"]);
        let export = ExportArgs {
            filters: FilterArgs::default(),
            output: Some(output.clone()),
        };
        let config = Config::default().with_data_dir(temp_dir.path());

        let result = run_export(&args, export, &config).await;
        assert!(matches!(result, Err(Error::NothingToExport)));
        assert!(!output.exists());
    }
}
