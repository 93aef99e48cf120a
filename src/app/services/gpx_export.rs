//! GPX 1.1 export of route lists
//!
//! Each route becomes one `<trk>` with a single `<trkseg>` holding its decoded
//! geometry in order.

use std::path::Path;
use tracing::info;

use crate::app::models::Route;
use crate::{Error, Result};

const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";

/// Render routes as a GPX 1.1 document
///
/// # Errors
/// * `Error::NothingToExport` if `routes` is empty
pub fn export_gpx<'a, I>(routes: I, creator: &str) -> Result<String>
where
    I: IntoIterator<Item = &'a Route>,
{
    let mut routes = routes.into_iter().peekable();
    if routes.peek().is_none() {
        return Err(Error::NothingToExport);
    }

    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    output.push_str(&format!(
        "<gpx version=\"1.1\" creator=\"{}\" xmlns=\"{}\">\n",
        escape_xml(creator),
        GPX_NAMESPACE
    ));

    let mut tracks = 0;
    for route in routes {
        output.push_str("    <trk>\n");
        output.push_str(&format!(
            "        <name>{}</name>\n",
            escape_xml(&route.title)
        ));
        output.push_str("        <trkseg>\n");
        for point in &route.geometry {
            output.push_str(&format!(
                "            <trkpt lat=\"{}\" lon=\"{}\"></trkpt>\n",
                point.lat, point.lon
            ));
        }
        output.push_str("        </trkseg>\n");
        output.push_str("    </trk>\n");
        tracks += 1;
    }

    output.push_str("</gpx>\n");

    info!("Rendered GPX document with {} tracks", tracks);
    Ok(output)
}

/// Write a rendered document to disk
pub async fn save_gpx(path: &Path, document: &str) -> Result<()> {
    tokio::fs::write(path, document)
        .await
        .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
