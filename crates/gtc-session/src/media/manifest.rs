/// HLS playlist URL for one flavor of an entry.
///
/// The token, when present, goes in as a `/ks/<token>` path segment right
/// before `a.m3u8`.
pub fn build_manifest_url(
    host: &str,
    partner_id: &str,
    entry_id: &str,
    flavor_id: &str,
    ks: Option<&str>,
) -> String {
    let host = host.trim_end_matches('/');
    let mut url = format!(
        "{host}/p/{partner_id}/sp/{partner_id}00/playManifest/entryId/{entry_id}/protocol/https/format/applehttp/flavorIds/{flavor_id}"
    );
    if let Some(ks) = ks {
        url.push_str("/ks/");
        url.push_str(ks);
    }
    url.push_str("/a.m3u8");
    url
}
