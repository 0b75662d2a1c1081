use crate::types::search_query::SearchQuery;

/// Maximum number of amenities the backend is asked to list per stay.
pub const MAX_AMENITIES: usize = 5;

pub fn build_stays_prompt(query: &SearchQuery) -> String {
    format!(
        r#"Act as a travel specialist. Find exactly {max_results} accommodation options around "{location}" within {radius_km} km.

Strictly return a JSON array of objects. Do not wrap the array in markdown code fences or add any text before or after it.

Each object must have:
- "name": string
- "type": string (e.g. Hotel, Hostel, Resort)
- "distance_km": number (estimated distance from "{location}" in km)
- "price_range": string (e.g. "$", "$$", "$$$")
- "rating": number (0-5)
- "amenities": list of strings (max {MAX_AMENITIES} items)
- "description": string (short marketing blurb)
"#,
        max_results = query.max_results,
        location = query.location,
        radius_km = query.radius_km,
    )
}
