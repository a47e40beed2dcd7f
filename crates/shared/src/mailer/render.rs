use chrono::NaiveDate;

use crate::models::{DigestContent, ProductSummary};

const BRAND_COLOR: &str = "#da552f";
const RULE_WIDTH: usize = 50;
const ATTRIBUTION_URL: &str = "https://github.com/eyupucmaz/product-hunt-mailer";

pub struct DigestRenderer;

impl DigestRenderer {
    /// "May 01, 2024"
    pub fn display_date(date: NaiveDate) -> String {
        date.format("%B %d, %Y").to_string()
    }

    pub fn html(digest: &DigestContent, date: NaiveDate) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("  <meta charset=\"utf-8\">\n");
        html.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str("  <title>Product Hunt Daily Digest</title>\n");
        html.push_str("</head>\n");
        html.push_str("<body style=\"margin: 0; padding: 0; background-color: #f3f4f6; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;\">\n");
        html.push_str("<div style=\"max-width: 640px; margin: 0 auto; padding: 40px 20px;\">\n");

        // Header
        html.push_str("  <div style=\"text-align: center; margin-bottom: 32px;\">\n");
        html.push_str("    <h1 style=\"font-size: 28px; font-weight: 700; color: #1f2937; margin: 0 0 8px 0;\">🚀 Product Hunt Daily</h1>\n");
        html.push_str(&format!(
            "    <p style=\"font-size: 14px; color: #6b7280; margin: 0;\">{}</p>\n",
            Self::display_date(date)
        ));
        html.push_str("  </div>\n");

        // Intro banner
        html.push_str(&format!(
            "  <div style=\"background: linear-gradient(135deg, {} 0%, #f97316 100%); padding: 24px; border-radius: 12px; margin-bottom: 32px;\">\n",
            BRAND_COLOR
        ));
        html.push_str(&format!(
            "    <p style=\"font-size: 16px; color: #ffffff; margin: 0; line-height: 1.6;\">{}</p>\n",
            escape_html(&digest.intro)
        ));
        html.push_str("  </div>\n");

        // Products
        html.push_str("  <div style=\"margin-bottom: 32px;\">\n");
        html.push_str("    <h2 style=\"font-size: 20px; font-weight: 600; color: #1f2937; margin: 0 0 20px 0;\">Today's Top Launches</h2>\n");
        for (index, product) in digest.products.iter().enumerate() {
            Self::push_card(&mut html, index + 1, product);
        }
        html.push_str("  </div>\n");

        // Footer
        html.push_str("  <div style=\"text-align: center; padding-top: 24px; border-top: 1px solid #e5e7eb;\">\n");
        html.push_str(&format!(
            "    <p style=\"font-size: 13px; color: #9ca3af; margin: 0 0 8px 0;\">Powered by <a href=\"https://www.producthunt.com\" style=\"color: {}; text-decoration: none;\">Product Hunt</a> &amp; <a href=\"https://ai.google.dev\" style=\"color: #4285f4; text-decoration: none;\">Gemini AI</a></p>\n",
            BRAND_COLOR
        ));
        html.push_str("    <p style=\"font-size: 12px; color: #9ca3af; margin: 0 0 12px 0;\">You're receiving this because you subscribed to Product Hunt Daily Digest.</p>\n");
        html.push_str(&format!(
            "    <p style=\"font-size: 12px; margin: 0;\"><a href=\"{}\" style=\"color: #6b7280; text-decoration: none;\">⭐ Star on GitHub</a></p>\n",
            ATTRIBUTION_URL
        ));
        html.push_str("  </div>\n");

        html.push_str("</div>\n</body>\n</html>");
        html
    }

    fn push_card(html: &mut String, rank: usize, product: &ProductSummary) {
        let name = escape_html(&product.name);
        let url = escape_html(&product.url);

        html.push_str("    <div style=\"margin-bottom: 32px; padding: 24px; background-color: #ffffff; border-radius: 12px; border: 1px solid #e5e7eb;\">\n");
        html.push_str("      <div style=\"display: flex; align-items: flex-start; gap: 16px;\">\n");
        if !product.image_url.is_empty() {
            html.push_str(&format!(
                "        <img src=\"{}\" alt=\"{}\" style=\"width: 64px; height: 64px; border-radius: 12px; object-fit: cover;\" />\n",
                escape_html(&product.image_url),
                name
            ));
        }
        html.push_str("        <div style=\"flex: 1;\">\n");
        html.push_str("          <div style=\"display: flex; align-items: center; gap: 8px; margin-bottom: 4px;\">\n");
        html.push_str(&format!(
            "            <span style=\"font-size: 12px; font-weight: 600; color: {}; background-color: #fff5f3; padding: 2px 8px; border-radius: 4px;\">#{}</span>\n",
            BRAND_COLOR, rank
        ));
        html.push_str(&format!(
            "            <a href=\"{}\" style=\"font-size: 18px; font-weight: 600; color: #1f2937; text-decoration: none;\">{}</a>\n",
            url, name
        ));
        html.push_str("          </div>\n");
        html.push_str(&format!(
            "          <p style=\"font-size: 14px; color: #6b7280; margin: 0 0 12px 0; font-style: italic;\">&quot;{}&quot;</p>\n",
            escape_html(&product.original_tagline)
        ));
        html.push_str(&format!(
            "          <p style=\"font-size: 15px; color: #374151; margin: 0 0 12px 0; line-height: 1.6;\">{}</p>\n",
            escape_html(&product.summary)
        ));
        if !product.why_it_matters.is_empty() {
            html.push_str(&format!(
                "          <p style=\"font-size: 14px; color: #059669; margin: 0 0 12px 0;\"><strong>💡 Why it matters:</strong> {}</p>\n",
                escape_html(&product.why_it_matters)
            ));
        }
        html.push_str("          <div style=\"display: flex; align-items: center; gap: 16px; font-size: 13px;\">\n");
        html.push_str(&format!(
            "            <span style=\"color: #6b7280;\">💬 {} comments</span>\n",
            product.comments_count
        ));
        if !product.topics.is_empty() {
            let tags = product
                .topics
                .iter()
                .map(|t| format!("<span style=\"color: #6b7280;\">{}</span>", escape_html(t)))
                .collect::<Vec<_>>()
                .join(" • ");
            html.push_str(&format!("            <span>{}</span>\n", tags));
        }
        html.push_str("          </div>\n");
        html.push_str(&format!(
            "          <a href=\"{}\" style=\"display: inline-block; margin-top: 12px; padding: 8px 16px; background-color: {}; color: #ffffff; text-decoration: none; border-radius: 6px; font-size: 14px; font-weight: 500;\">View on Product Hunt →</a>\n",
            url, BRAND_COLOR
        ));
        html.push_str("        </div>\n");
        html.push_str("      </div>\n");
        html.push_str("    </div>\n");
    }

    pub fn text(digest: &DigestContent, date: NaiveDate) -> String {
        let heavy_rule = "=".repeat(RULE_WIDTH);
        let light_rule = "-".repeat(RULE_WIDTH);
        let mut lines: Vec<String> = vec![
            "🚀 PRODUCT HUNT DAILY DIGEST".to_string(),
            format!("   {}", Self::display_date(date)),
            String::new(),
            heavy_rule.clone(),
            String::new(),
            digest.intro.clone(),
            String::new(),
            heavy_rule,
            String::new(),
            "TODAY'S TOP LAUNCHES".to_string(),
            String::new(),
        ];

        for (index, product) in digest.products.iter().enumerate() {
            lines.push(format!("#{} {}", index + 1, product.name));
            lines.push(format!("   \"{}\"", product.original_tagline));
            lines.push(String::new());
            lines.push(format!("   {}", product.summary));
            lines.push(String::new());
            if !product.why_it_matters.is_empty() {
                lines.push(format!("   💡 Why it matters: {}", product.why_it_matters));
                lines.push(String::new());
            }
            lines.push(format!("   💬 {} comments", product.comments_count));
            if !product.topics.is_empty() {
                lines.push(format!("   🏷  {}", product.topics.join(" • ")));
            }
            lines.push(format!("   🔗 {}", product.url));
            lines.push(String::new());
            lines.push(light_rule.clone());
            lines.push(String::new());
        }

        lines.push("Powered by Product Hunt & Gemini AI".to_string());
        lines.push(String::new());
        lines.push(format!("⭐ Star on GitHub: {}", ATTRIBUTION_URL));
        lines.push(String::new());

        lines.join("\n")
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
