//! Static HTML presentation: one Leaflet map and directions panel per scenario.

use serde::Serialize;

use crate::itinerary::ItineraryReport;
use crate::route::RouteResult;
use crate::router::ScenarioRun;
use crate::traits::{Coordinate, DEPOT_LABEL, PresentationSurface};

#[derive(Debug, Clone, Serialize)]
pub struct PanelMarker {
    pub lat: f64,
    pub lng: f64,
    pub label: String,
}

/// Everything drawn for one scenario.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MapPanel {
    pub title: String,
    pub markers: Vec<PanelMarker>,
    pub path: Vec<(f64, f64)>,
    #[serde(skip)]
    pub report: Option<ItineraryReport>,
}

#[derive(Debug, Clone)]
pub struct HtmlSurface {
    /// Used until the page fits the map to its markers.
    pub default_center: Coordinate,
    pub default_zoom: u8,
}

impl Default for HtmlSurface {
    fn default() -> Self {
        Self {
            default_center: Coordinate::new(30.7052, 76.785),
            default_zoom: 13,
        }
    }
}

impl PresentationSurface for HtmlSurface {
    type Handle = MapPanel;

    fn create_map_surface(&self, title: &str) -> MapPanel {
        MapPanel {
            title: title.to_string(),
            ..MapPanel::default()
        }
    }

    fn place_marker(&self, surface: &mut MapPanel, at: Coordinate, label: &str) {
        surface.markers.push(PanelMarker {
            lat: at.lat,
            lng: at.lng,
            label: label.to_string(),
        });
    }

    fn render_route(&self, surface: &mut MapPanel, route: &RouteResult) {
        surface.path = route.overview.points().to_vec();
    }

    fn append_report_lines(&self, surface: &mut MapPanel, report: &ItineraryReport) {
        surface.report = Some(report.clone());
    }
}

impl HtmlSurface {
    /// Render a complete page for the given runs.
    pub fn render_page(&self, title: &str, runs: &[ScenarioRun<MapPanel>]) -> String {
        let mut body = String::new();
        for run in runs {
            body.push_str(&format!(
                "<div class=\"map-and-panel-container\">\n\
                 <div id=\"map-{index}\" class=\"map-container\"></div>\n\
                 <div class=\"directions-panel\">{panel}</div>\n\
                 </div>\n",
                index = run.index,
                panel = panel_html(run),
            ));
        }

        let maps: Vec<MapData<'_>> = runs
            .iter()
            .map(|run| MapData {
                id: format!("map-{}", run.index),
                panel: &run.surface,
            })
            .collect();
        let data = script_json(&maps);

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
             <link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.css\">\n\
             <style>{STYLE}</style>\n</head>\n<body>\n<div id=\"container\">\n{body}</div>\n\
             <script src=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.js\"></script>\n\
             <script>\nconst maps = {data};\nconst defaultView = [{lat}, {lng}];\n\
             const defaultZoom = {zoom};\nconst depotLabel = \"{DEPOT_LABEL}\";\n{SCRIPT}</script>\n\
             </body>\n</html>\n",
            title = escape_html(title),
            lat = self.default_center.lat,
            lng = self.default_center.lng,
            zoom = self.default_zoom,
        )
    }
}

#[derive(Serialize)]
struct MapData<'a> {
    id: String,
    #[serde(flatten)]
    panel: &'a MapPanel,
}

fn panel_html(run: &ScenarioRun<MapPanel>) -> String {
    let mut html = String::new();
    match &run.outcome {
        Ok(report) => {
            html.push_str(&format!("<b>{}</b><br>", escape_html(&report.header)));
            for line in &report.lines {
                html.push_str(&format!(
                    "<b>Route Segment: {}</b><br>{} to {}<br>{}<br>",
                    line.segment,
                    escape_html(&line.start_address),
                    escape_html(&line.end_address),
                    escape_html(&line.distance_text),
                ));
                if let Some(load) = line.load {
                    html.push_str(&format!(
                        "Load at {}: {}<br>",
                        escape_html(&line.end_address),
                        load
                    ));
                }
                html.push_str("<br>");
            }
        }
        Err(failure) => {
            html.push_str(&format!(
                "<b>{}</b><br><p class=\"route-error\">{}</p>",
                escape_html(&run.surface.title),
                escape_html(&capitalise(&failure.to_string())),
            ));
        }
    }
    html
}

fn capitalise(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// JSON safe to embed in a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/")
}

const STYLE: &str = "\
#container { display: flex; flex-direction: column; gap: 16px; }
.map-and-panel-container { display: flex; gap: 12px; }
.map-container { height: 420px; flex: 2; }
.directions-panel { flex: 1; overflow: auto; max-height: 420px; font-family: sans-serif; }
.route-error { color: #b00020; }
";

const SCRIPT: &str = "\
for (const data of maps) {
  const map = L.map(data.id).setView(defaultView, defaultZoom);
  L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
    attribution: '&copy; OpenStreetMap contributors'
  }).addTo(map);
  const bounds = [];
  if (data.path.length) {
    L.polyline(data.path, { color: '#1a73e8', weight: 5 }).addTo(map);
    bounds.push(...data.path);
  }
  for (const marker of data.markers) {
    L.circleMarker([marker.lat, marker.lng], {
      radius: 10,
      color: 'black',
      weight: 1,
      fillColor: marker.label === depotLabel ? '#ffdb00' : 'blue',
      fillOpacity: 1
    }).bindTooltip(marker.label, { permanent: true, direction: 'center' }).addTo(map);
    bounds.push([marker.lat, marker.lng]);
  }
  if (bounds.length > 1) {
    map.fitBounds(bounds, { padding: [24, 24] });
  }
}
";
