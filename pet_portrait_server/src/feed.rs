//! Google Merchant product feed.
//!
//! Builds an RSS 2.0 document with the `g:` namespace from the merged catalog. Every (product, size) combination
//! becomes one item, priced with the same rounding rule the checkout uses. Note that checkout validates against
//! the built-in price table, so an admin base-price override shows up here before it affects what an order costs.
use pet_portrait_engine::pricing::{CatalogEntry, SIZE_TABLE};

pub fn merchant_feed(catalog: &[CatalogEntry], store_url: &str) -> String {
    let mut xml = String::with_capacity(4096);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<rss version="2.0" xmlns:g="http://base.google.com/ns/1.0">"#);
    xml.push_str("\n<channel>\n");
    xml.push_str("<title>Pet Portrait Prints</title>\n");
    xml.push_str(&format!("<link>{}</link>\n", escape(store_url)));
    xml.push_str("<description>Custom pet portraits printed on canvas, poster, and metal.</description>\n");
    for entry in catalog {
        for (size, modifier) in SIZE_TABLE {
            #[allow(clippy::cast_possible_truncation)]
            let dollars = (entry.base_price.whole_dollars() as f64 * modifier).round() as i64;
            let id = format!("{}-{}", entry.product_type, size);
            xml.push_str("<item>\n");
            xml.push_str(&format!("<g:id>{}</g:id>\n", escape(&id)));
            xml.push_str(&format!("<g:title>{} ({size})</g:title>\n", escape(&entry.name)));
            xml.push_str(&format!(
                "<g:description>Custom {} of your pet, {size}.</g:description>\n",
                escape(&entry.name)
            ));
            xml.push_str(&format!("<g:link>{}/products/{}</g:link>\n", escape(store_url), escape(&entry.product_type)));
            if let Some(image_url) = &entry.image_url {
                xml.push_str(&format!("<g:image_link>{}</g:image_link>\n", escape(image_url)));
            }
            xml.push_str(&format!("<g:price>{dollars}.00 USD</g:price>\n"));
            xml.push_str("<g:condition>new</g:condition>\n");
            xml.push_str("<g:availability>in stock</g:availability>\n");
            xml.push_str("</item>\n");
        }
    }
    xml.push_str("</channel>\n</rss>\n");
    xml
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
