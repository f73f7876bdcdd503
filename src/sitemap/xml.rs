use chrono::SecondsFormat;
use quick_xml::escape::escape;

use super::entry::SitemapEntry;

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
pub const IMAGE_NAMESPACE: &str = "http://www.google.com/schemas/sitemap-image/1.1";

/// Serializes entries as a sitemap-protocol `<urlset>` document
///
/// All text content goes through XML escaping, so URLs carrying `&` query
/// separators or quotes stay well-formed.
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    // Roughly 200 bytes per <url> block
    let mut xml = String::with_capacity(256 + entries.len() * 200);

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!(
        "<urlset xmlns=\"{}\" xmlns:image=\"{}\">\n",
        SITEMAP_NAMESPACE, IMAGE_NAMESPACE
    ));

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape(entry.url())));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.last_modified().to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.change_frequency()));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority()));
        for image in entry.images() {
            xml.push_str(&format!(
                "    <image:image>\n      <image:loc>{}</image:loc>\n    </image:image>\n",
                escape(image.as_str())
            ));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}
