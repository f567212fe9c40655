//! XML request bodies
//!
//! The service management API takes fixed-shape XML documents. Labels and
//! configuration blobs travel base64-encoded; every other text field,
//! names included, is entity-escaped so user input can never break the
//! document structure.

use crate::error::{ProtocolError, Result};
use crate::model::{Deployment, HostedService};
use crate::XML_NAMESPACE;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use quick_xml::escape::escape;

/// Build the `CreateHostedService` document for `service`.
///
/// # Errors
///
/// Returns [`ProtocolError::MissingField`] when the name, label or location
/// is empty.
pub fn encode_hosted_service_create(service: &HostedService) -> Result<String> {
    require("name", &service.name)?;
    require("label", &service.label)?;
    require("location", &service.location)?;

    Ok(format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<CreateHostedService xmlns="{ns}">
  <ServiceName>{name}</ServiceName>
  <Label>{label}</Label>
  <Description>{description}</Description>
  <Location>{location}</Location>
</CreateHostedService>"#,
        ns = XML_NAMESPACE,
        name = escape(service.name.as_str()),
        label = encode_base64(service.label.as_bytes()),
        description = escape(service.description.as_str()),
        location = escape(service.location.as_str()),
    ))
}

/// Build the `CreateDeployment` document for `deployment`.
///
/// # Errors
///
/// Returns [`ProtocolError::MissingField`] when the name, package URL or
/// label is empty.
pub fn encode_deployment_create(deployment: &Deployment) -> Result<String> {
    require("name", &deployment.name)?;
    require("package_url", &deployment.package_url)?;
    require("label", &deployment.label)?;

    Ok(format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<CreateDeployment xmlns="{ns}">
  <Name>{name}</Name>
  <PackageUrl>{package_url}</PackageUrl>
  <Label>{label}</Label>
  <Configuration>{configuration}</Configuration>
  <StartDeployment>{start}</StartDeployment>
  <TreatWarningsAsError>{warnings}</TreatWarningsAsError>
</CreateDeployment>"#,
        ns = XML_NAMESPACE,
        name = escape(deployment.name.as_str()),
        package_url = escape(deployment.package_url.as_str()),
        label = encode_base64(deployment.label.as_bytes()),
        configuration = encode_base64(&deployment.configuration),
        start = deployment.start_deployment,
        warnings = deployment.treat_warnings_as_errors,
    ))
}

/// Standard (padded) base64 of `bytes`.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ProtocolError::MissingField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use quick_xml::Reader;
    use quick_xml::events::Event;
    use std::collections::HashMap;

    /// Parse a flat request document into element name -> (count, text).
    fn parse_elements(xml: &str) -> HashMap<String, (usize, String)> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut elements: HashMap<String, (usize, String)> = HashMap::new();
        let mut current: Option<String> = None;
        loop {
            match reader.read_event().expect("document should be well-formed") {
                Event::Start(e) => {
                    let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                    elements.entry(name.clone()).or_default().0 += 1;
                    current = Some(name);
                }
                Event::Text(t) => {
                    if let Some(name) = &current {
                        let text = t.unescape().unwrap().into_owned();
                        elements.get_mut(name).unwrap().1 = text;
                    }
                }
                Event::End(_) => current = None,
                Event::Eof => break,
                _ => {}
            }
        }
        elements
    }

    /// Raw (still escaped) text between `<tag>` and `</tag>`.
    fn raw_text<'a>(xml: &'a str, tag: &str) -> &'a str {
        let open = format!("<{}>", tag);
        let close = format!("</{}>", tag);
        let start = xml.find(&open).expect("opening tag") + open.len();
        let end = xml[start..].find(&close).expect("closing tag") + start;
        &xml[start..end]
    }

    /// `true` when every `&` in `text` starts a predefined entity.
    fn only_entity_ampersands(text: &str) -> bool {
        text.replace("&amp;", "")
            .replace("&lt;", "")
            .replace("&gt;", "")
            .replace("&quot;", "")
            .replace("&apos;", "")
            .find('&')
            .is_none()
    }

    fn sample_service() -> HostedService {
        HostedService::new("contoso-web")
            .with_label("Contoso Web")
            .with_description("Front end <beta> & \"friends\"")
            .with_location("West US")
    }

    fn sample_deployment() -> Deployment {
        Deployment::new("v42")
            .with_package_url("https://store.blob.core.windows.net/pkgs/app.cspkg?sig=a&se=b")
            .with_label("release 42")
            .with_configuration("<ServiceConfiguration serviceName=\"contoso-web\"/>")
    }

    #[test]
    fn test_hosted_service_document() {
        let xml = encode_hosted_service_create(&sample_service()).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
        assert!(xml.contains(r#"<CreateHostedService xmlns="http://schemas.microsoft.com/windowsazure">"#));
        assert!(xml.contains("<ServiceName>contoso-web</ServiceName>"));
        assert!(xml.contains("<Label>Q29udG9zbyBXZWI=</Label>"));
        assert!(xml.contains("<Location>West US</Location>"));
        assert!(xml.contains("&lt;beta&gt; &amp; &quot;friends&quot;"));
    }

    #[test]
    fn test_hosted_service_elements_round_trip() {
        let service = sample_service();
        let elements = parse_elements(&encode_hosted_service_create(&service).unwrap());

        for name in ["ServiceName", "Label", "Description", "Location"] {
            assert_eq!(elements[name].0, 1, "{name} should appear exactly once");
        }
        assert_eq!(elements["Description"].1, service.description);
        assert_eq!(
            STANDARD.decode(&elements["Label"].1).unwrap(),
            service.label.as_bytes()
        );
    }

    #[test]
    fn test_names_with_markup_are_escaped() {
        let service = HostedService::new("R&D <web>")
            .with_label("R&D")
            .with_location("West US");
        let xml = encode_hosted_service_create(&service).unwrap();
        assert!(xml.contains("<ServiceName>R&amp;D &lt;web&gt;</ServiceName>"));
        assert_eq!(parse_elements(&xml)["ServiceName"].1, "R&D <web>");

        let deployment = sample_deployment();
        let deployment = Deployment {
            name: "v1 <\"beta\"> & co".to_string(),
            ..deployment
        };
        let xml = encode_deployment_create(&deployment).unwrap();
        assert_eq!(parse_elements(&xml)["Name"].1, deployment.name);
    }

    #[test]
    fn test_hosted_service_empty_description_is_allowed() {
        let service = HostedService::new("svc")
            .with_label("svc")
            .with_location("East Asia");
        let xml = encode_hosted_service_create(&service).unwrap();
        assert!(xml.contains("<Description></Description>"));
    }

    #[test]
    fn test_hosted_service_missing_fields() {
        let missing_name = HostedService::default()
            .with_label("l")
            .with_location("West US");
        assert_eq!(
            encode_hosted_service_create(&missing_name),
            Err(ProtocolError::MissingField("name"))
        );

        let missing_label = HostedService::new("svc").with_location("West US");
        assert_eq!(
            encode_hosted_service_create(&missing_label),
            Err(ProtocolError::MissingField("label"))
        );

        let missing_location = HostedService::new("svc").with_label("l");
        assert_eq!(
            encode_hosted_service_create(&missing_location),
            Err(ProtocolError::MissingField("location"))
        );
    }

    #[test]
    fn test_deployment_document() {
        let deployment = sample_deployment();
        let xml = encode_deployment_create(&deployment).unwrap();
        let elements = parse_elements(&xml);

        for name in [
            "Name",
            "PackageUrl",
            "Label",
            "Configuration",
            "StartDeployment",
            "TreatWarningsAsError",
        ] {
            assert_eq!(elements[name].0, 1, "{name} should appear exactly once");
        }
        assert_eq!(elements["Name"].1, "v42");
        assert_eq!(elements["PackageUrl"].1, deployment.package_url);
        assert!(xml.contains("sig=a&amp;se=b"));
        assert_eq!(
            STANDARD.decode(&elements["Configuration"].1).unwrap(),
            deployment.configuration
        );
        assert_eq!(elements["StartDeployment"].1, "true");
        assert_eq!(elements["TreatWarningsAsError"].1, "true");
    }

    #[test]
    fn test_deployment_flags_lowercase() {
        let deployment = sample_deployment()
            .with_start_deployment(false)
            .with_treat_warnings_as_errors(false);
        let xml = encode_deployment_create(&deployment).unwrap();
        assert!(xml.contains("<StartDeployment>false</StartDeployment>"));
        assert!(xml.contains("<TreatWarningsAsError>false</TreatWarningsAsError>"));
    }

    #[test]
    fn test_deployment_empty_configuration() {
        let deployment = sample_deployment().with_configuration(Vec::new());
        let xml = encode_deployment_create(&deployment).unwrap();
        assert!(xml.contains("<Configuration></Configuration>"));
    }

    #[test]
    fn test_deployment_missing_fields() {
        let no_url = Deployment::new("v1").with_label("l");
        assert_eq!(
            encode_deployment_create(&no_url),
            Err(ProtocolError::MissingField("package_url"))
        );

        let no_label = Deployment::new("v1").with_package_url("https://x/y.cspkg");
        assert_eq!(
            encode_deployment_create(&no_label),
            Err(ProtocolError::MissingField("label"))
        );
    }

    proptest! {
        #[test]
        fn prop_hosted_service_is_well_formed(
            name in "[A-Za-z0-9<>&\"' -]{1,30}",
            label in "\\PC{1,40}",
            description in "\\PC{0,80}",
            location in "[A-Za-z<>&\"' ]{1,30}",
        ) {
            prop_assume!(!name.trim().is_empty());
            prop_assume!(!label.trim().is_empty());
            prop_assume!(!location.trim().is_empty());

            let service = HostedService::new(name.clone())
                .with_label(label.clone())
                .with_description(description.clone())
                .with_location(location.clone());
            let xml = encode_hosted_service_create(&service).unwrap();
            let elements = parse_elements(&xml);

            for element in ["ServiceName", "Label", "Description", "Location"] {
                prop_assert_eq!(elements[element].0, 1);
            }
            prop_assert_eq!(&elements["ServiceName"].1, name.trim());
            let decoded = STANDARD.decode(&elements["Label"].1).unwrap();
            prop_assert_eq!(decoded, label.into_bytes());

            for tag in ["ServiceName", "Description", "Location"] {
                let text = raw_text(&xml, tag);
                prop_assert!(!text.contains('<'), "{} holds a raw '<': {}", tag, text);
                prop_assert!(!text.contains('>'), "{} holds a raw '>': {}", tag, text);
                prop_assert!(only_entity_ampersands(text), "{} holds a raw '&': {}", tag, text);
            }
        }

        #[test]
        fn prop_deployment_is_well_formed(
            name in "[A-Za-z0-9<>&\"' -]{1,30}",
            package_url in "https://[a-z]{1,10}\\.example\\.com/[a-z]{1,8}\\?[a-z=&<>]{0,20}",
            label in "\\PC{1,40}",
        ) {
            prop_assume!(!name.trim().is_empty());
            prop_assume!(!label.trim().is_empty());

            let deployment = Deployment::new(name.clone())
                .with_package_url(package_url.clone())
                .with_label(label);
            let xml = encode_deployment_create(&deployment).unwrap();
            let elements = parse_elements(&xml);

            prop_assert_eq!(elements["Name"].0, 1);
            prop_assert_eq!(&elements["Name"].1, name.trim());
            prop_assert_eq!(&elements["PackageUrl"].1, &package_url);
            for tag in ["Name", "PackageUrl"] {
                let text = raw_text(&xml, tag);
                prop_assert!(!text.contains('<') && !text.contains('>'));
                prop_assert!(only_entity_ampersands(text));
            }
        }
    }
}
