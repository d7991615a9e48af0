use crate::errors::CallhaulError;

/// Normalize punctuation that word processors substitute into report names.
/// The admin service stores names with plain ASCII punctuation; sending the
/// typographic variants corrupts the request body encoding.
pub fn sanitize_report_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' => '-',         // en/em dash
            '\u{201c}' | '\u{201d}' => '"',         // curly double quotes
            '\u{2018}' | '\u{2019}' => '\'',        // curly single quotes
            other => other,
        })
        .collect()
}

/// Escape a value for embedding in an envelope body.
pub fn xml_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Undo entity escaping in text pulled out of a response body.
pub fn xml_unescape(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Extract the text of the `<return>` element from a response body. The
/// response schema is otherwise opaque; this is the one field every call
/// exposes. An empty `<return/>` yields an empty string.
pub fn extract_return(body: &str) -> Result<String, CallhaulError> {
    if let Some(start) = body.find("<return>") {
        let rest = &body[start + "<return>".len()..];
        if let Some(end) = rest.find("</return>") {
            return Ok(xml_unescape(&rest[..end]));
        }
    }
    if body.contains("<return/>") {
        return Ok(String::new());
    }
    Err(CallhaulError::Protocol(
        "Response contains no <return> element".into(),
    ))
}

pub fn run_report_body(folder: &str, report_name: &str, start: &str, end: &str) -> String {
    let report_name = sanitize_report_name(report_name);
    format!(
        r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ser="http://service.admin.ws.five9.com/">
   <soapenv:Header/>
   <soapenv:Body>
      <ser:runReport>
         <folderName>{}</folderName>
         <reportName>{}</reportName>
         <criteria>
            <time>
               <start>{}</start>
               <end>{}</end>
            </time>
         </criteria>
      </ser:runReport>
   </soapenv:Body>
</soapenv:Envelope>"#,
        xml_escape(folder),
        xml_escape(&report_name),
        xml_escape(start),
        xml_escape(end),
    )
}

pub fn is_running_body(identifier: &str) -> String {
    format!(
        r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ser="http://service.admin.ws.five9.com/">
   <soapenv:Header/>
   <soapenv:Body>
      <ser:isReportRunning>
         <identifier>{}</identifier>
      </ser:isReportRunning>
   </soapenv:Body>
</soapenv:Envelope>"#,
        xml_escape(identifier),
    )
}

pub fn fetch_results_body(identifier: &str) -> String {
    format!(
        r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ser="http://service.admin.ws.five9.com/">
   <soapenv:Header/>
   <soapenv:Body>
      <ser:getReportResultCsv>
         <identifier>{}</identifier>
      </ser:getReportResultCsv>
   </soapenv:Body>
</soapenv:Envelope>"#,
        xml_escape(identifier),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_normalizes_dashes_and_quotes() {
        assert_eq!(sanitize_report_name("Calls \u{2013} Daily"), "Calls - Daily");
        assert_eq!(sanitize_report_name("Calls \u{2014} Daily"), "Calls - Daily");
        assert_eq!(
            sanitize_report_name("\u{201c}Agent\u{201d} \u{2018}Stats\u{2019}"),
            "\"Agent\" 'Stats'"
        );
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let once = sanitize_report_name("Call Log \u{2013} \u{201c}Weekly\u{201d}");
        assert_eq!(sanitize_report_name(&once), once);
    }

    #[test]
    fn test_sanitize_leaves_plain_names_alone() {
        assert_eq!(sanitize_report_name("Call Log"), "Call Log");
    }

    #[test]
    fn test_extract_return_identifier() {
        let body = "<Envelope><Body><ns2:runReportResponse><return>abc123</return></ns2:runReportResponse></Body></Envelope>";
        assert_eq!(extract_return(body).unwrap(), "abc123");
    }

    #[test]
    fn test_extract_return_unescapes_entities() {
        let body = "<return>a &amp; b &lt;c&gt;</return>";
        assert_eq!(extract_return(body).unwrap(), "a & b <c>");
    }

    #[test]
    fn test_extract_return_empty_element() {
        assert_eq!(extract_return("<Body><return/></Body>").unwrap(), "");
    }

    #[test]
    fn test_extract_return_missing_is_protocol_error() {
        let err = extract_return("<Body><fault>boom</fault></Body>").unwrap_err();
        assert!(matches!(err, CallhaulError::Protocol(_)));
    }

    #[test]
    fn test_run_report_body_escapes_values() {
        let body = run_report_body("R&D Reports", "Calls <Daily>", "2024-01-01", "2024-01-02");
        assert!(body.contains("<folderName>R&amp;D Reports</folderName>"));
        assert!(body.contains("<reportName>Calls &lt;Daily&gt;</reportName>"));
    }

    #[test]
    fn test_run_report_body_sanitizes_name() {
        let body = run_report_body("Shared Reports", "Calls \u{2013} Daily", "a", "b");
        assert!(body.contains("<reportName>Calls - Daily</reportName>"));
    }
}
