use urlencoding::encode;

use crate::types::{
    search_view_state::{SearchFailureKind, SearchViewState},
    stay_record::StayRecord,
};

const RADIUS_RANGE_KM: (u32, u32) = (1, 50);
const MAX_RESULTS_RANGE: (u32, u32) = (1, 20);

const SUGGESTED_LOCATIONS: [&str; 3] = ["Kyoto", "Downtown Chicago", "Paris Latin Quarter"];

const DISCLAIMER: &str = "This tool uses AI. Prices, ratings, and availability are estimates and may not be real-time. Always verify with booking platforms.";

/// Static, per-process settings the page needs besides the view state.
#[derive(Clone, Debug)]
pub struct PageConfig {
    pub app_name: String,
    pub default_location: String,
    pub default_radius_km: u32,
    pub default_max_results: u32,
}

pub fn render_stays_page(
    page: &PageConfig,
    api_key_loaded: bool,
    state: &SearchViewState,
) -> String {
    let sidebar = render_sidebar(api_key_loaded, state);
    let form = render_search_form(page, state);
    let results = render_results(state);

    let content = format!(
        r#"<aside class="sidebar">{sidebar}</aside>
<main class="container">
<h1>&#127976; {app_name}</h1>
<p class="tagline">Find accommodation near your location using AI.</p>
{form}
<div id="results">{results}</div>
</main>
{script}"#,
        app_name = html_escape(&page.app_name),
        script = IN_FLIGHT_SCRIPT,
    );

    build_page(&page.app_name, &content)
}

fn render_sidebar(api_key_loaded: bool, state: &SearchViewState) -> String {
    let key_status = if api_key_loaded {
        r#"<div class="notice success">&#9989; API key loaded</div>"#.to_string()
    } else {
        r#"<div class="notice error">&#10060; API key missing</div>
<div class="notice info">Add GEMINI_API_KEY to your .env file</div>"#
            .to_string()
    };

    format!(
        r#"<h2>Settings</h2>
{key_status}
<hr>
<h3>Search Parameters</h3>
<label for="radius_km">Search Radius (km): <output id="radius_km_value">{radius}</output></label>
<input form="search-form" type="range" id="radius_km" name="radius_km" min="{rmin}" max="{rmax}" value="{radius}" oninput="document.getElementById('radius_km_value').value = this.value">
<label for="max_results">Max Results: <output id="max_results_value">{max}</output></label>
<input form="search-form" type="range" id="max_results" name="max_results" min="{mmin}" max="{mmax}" value="{max}" oninput="document.getElementById('max_results_value').value = this.value">
<hr>
<p class="caption">&#9888;&#65039; <strong>Disclaimer:</strong> {DISCLAIMER}</p>"#,
        radius = state.radius_km,
        max = state.max_results,
        rmin = RADIUS_RANGE_KM.0,
        rmax = RADIUS_RANGE_KM.1,
        mmin = MAX_RESULTS_RANGE.0,
        mmax = MAX_RESULTS_RANGE.1,
    )
}

fn render_search_form(page: &PageConfig, state: &SearchViewState) -> String {
    format!(
        r#"<form id="search-form" class="search-row" method="get" action="/search">
<label for="location">Enter location:</label>
<input type="text" id="location" name="location" placeholder="e.g., {placeholder}" value="{location}">
<button id="search-button" type="submit">Find Stays</button>
</form>
<p id="search-status" class="caption" hidden></p>"#,
        location = html_escape(&state.location),
        placeholder = html_escape(&page.default_location),
    )
}

fn render_results(state: &SearchViewState) -> String {
    if let Some(failure) = &state.error {
        let title = match failure.kind {
            SearchFailureKind::Configuration => "&#10060; ",
            SearchFailureKind::Backend | SearchFailureKind::Parse => "",
        };
        return format!(
            r#"<div class="notice error">{title}{}</div>"#,
            html_escape(&failure.message)
        );
    }

    if state.location.trim().is_empty() {
        let suggestions = SUGGESTED_LOCATIONS
            .iter()
            .map(|l| {
                format!(
                    r#"<a href="/search?location={}">{}</a>"#,
                    encode(l),
                    html_escape(l)
                )
            })
            .collect::<Vec<String>>()
            .join(", ");
        return format!(
            r#"<div class="notice info">&#128161; <strong>Try searching for:</strong> {suggestions}</div>"#
        );
    }

    if !state.has_searched() {
        return String::new();
    }

    if state.stays.is_empty() {
        return format!(
            r#"<div class="notice warning">No stays found near {}. Try a different location.</div>"#,
            html_escape(&state.location)
        );
    }

    let cards = state
        .stays
        .iter()
        .map(render_stay_card)
        .collect::<Vec<String>>()
        .join("\n<hr>\n");

    format!(
        r#"<div class="notice success">Found {count} stays near {location}</div>
{cards}"#,
        count = state.stays.len(),
        location = html_escape(&state.location),
    )
}

fn render_stay_card(stay: &StayRecord) -> String {
    let rating = stay.rating.unwrap_or(0.0);
    let amenities = match stay.amenities.as_deref() {
        Some(list) if !list.is_empty() => format!(
            r#"<p class="amenities"><strong>Amenities:</strong> {}</p>"#,
            list.iter()
                .map(|a| html_escape(a))
                .collect::<Vec<String>>()
                .join(" &bull; ")
        ),
        _ => String::new(),
    };

    format!(
        r#"<div class="stay-card">
<div class="stay-main">
<h3>{name}</h3>
<p class="caption"><strong>{stay_type}</strong> &bull; {distance} km from center</p>
<p class="rating">{stars} ({rating}/5)</p>
<p>{description}</p>
{amenities}
</div>
<div class="stay-price"><span class="label">Price</span><span class="value">{price}</span></div>
</div>"#,
        name = html_escape(stay.name.as_deref().unwrap_or("Unknown Stay")),
        stay_type = html_escape(stay.stay_type.as_deref().unwrap_or("Hotel")),
        distance = stay.distance_km.unwrap_or(0.0),
        stars = rating_stars(rating),
        description = html_escape(stay.description.as_deref().unwrap_or("")),
        price = html_escape(stay.price_range.as_deref().unwrap_or("N/A")),
    )
}

/// One star per whole rating point, clamped to the 0-5 scale.
fn rating_stars(rating: f64) -> String {
    let whole = if rating.is_finite() {
        rating.clamp(0.0, 5.0).floor() as usize
    } else {
        0
    };
    "&#11088;".repeat(whole)
}

// Disables the search button while a request is pending so searches never overlap.
const IN_FLIGHT_SCRIPT: &str = r#"<script>
(function () {
    const form = document.getElementById('search-form');
    const button = document.getElementById('search-button');
    const status = document.getElementById('search-status');
    let searchInFlight = false;

    form.addEventListener('submit', function (event) {
        const location = document.getElementById('location').value.trim();
        if (searchInFlight) {
            event.preventDefault();
            return;
        }
        searchInFlight = true;
        button.disabled = true;
        if (location) {
            status.textContent = '🔍 AI is scanning for stays in ' + location + '...';
            status.hidden = false;
        }
    });

    window.addEventListener('pageshow', function () {
        searchInFlight = false;
        button.disabled = false;
        status.hidden = true;
    });
})();
</script>"#;

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#1a1a1a;background:#fafafa;display:flex;min-height:100vh;}}
.sidebar{{width:300px;background:#f0f2f6;padding:24px;display:flex;flex-direction:column;gap:10px;}}
.sidebar input[type=range]{{width:100%;}}
.container{{flex:1;max-width:960px;margin:0 auto;padding:24px;}}
.container h1{{font-size:28px;margin-bottom:4px;}}
.tagline{{color:#555;margin-bottom:20px;}}
.search-row{{display:flex;gap:12px;align-items:center;margin-bottom:20px;}}
.search-row input[type=text]{{flex:1;padding:8px;border:1px solid #ccc;border-radius:4px;}}
.search-row button{{padding:8px 20px;background:#ff4b4b;color:#fff;border:none;border-radius:4px;font-weight:600;cursor:pointer;}}
.search-row button:disabled{{background:#ccc;cursor:wait;}}
.notice{{padding:10px 14px;border-radius:4px;margin-bottom:12px;font-size:14px;}}
.notice.success{{background:#e8f5e9;color:#2e7d32;}}
.notice.error{{background:#fce4ec;color:#c62828;}}
.notice.warning{{background:#fff8e1;color:#795548;}}
.notice.info{{background:#e3f2fd;color:#1565c0;}}
.caption{{font-size:13px;color:#666;}}
.stay-card{{display:flex;gap:24px;background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:16px;margin:12px 0;}}
.stay-main{{flex:3;}}
.stay-main h3{{font-size:18px;margin-bottom:4px;}}
.stay-main p{{margin-bottom:6px;}}
.stay-price{{flex:1;display:flex;flex-direction:column;justify-content:center;}}
.stay-price .label{{font-size:13px;color:#666;}}
.stay-price .value{{font-size:28px;}}
hr{{border:none;border-top:1px solid #e0e0e0;margin:8px 0;}}
</style>
</head>
<body>
{content}
</body>
</html>"#,
        title = html_escape(title),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
