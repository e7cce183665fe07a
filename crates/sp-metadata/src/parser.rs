//! Streaming parser for SP metadata documents.
//!
//! Elements are matched by resolved namespace and local name: metadata
//! elements must be in the SAML 2.0 metadata namespace and signature
//! elements in the XML-DSig namespace, whatever prefix binds them.
//! Attributes are matched only when unprefixed. Only the first
//! `SPSSODescriptor` is read and only a `Signature` that is a direct child of
//! the `EntityDescriptor` is treated as the document signature.

use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use crate::constants::{METADATA_NS, XMLDSIG_NS};
use crate::error::{MetadataError, MetadataResult};
use crate::model::{
    Endpoint, IndexedEndpoint, KeyDescriptor, KeyUsage, MetadataSignature, SpMetadata,
};

const ENTITY_DESCRIPTOR: &[u8] = b"EntityDescriptor";
const ENTITIES_DESCRIPTOR: &[u8] = b"EntitiesDescriptor";
const SP_SSO_DESCRIPTOR: &[u8] = b"SPSSODescriptor";
const KEY_DESCRIPTOR: &[u8] = b"KeyDescriptor";
const SIGNATURE: &[u8] = b"Signature";
const X509_CERTIFICATE: &[u8] = b"X509Certificate";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Ns {
    Metadata,
    XmlDsig,
    #[default]
    Other,
}

impl Ns {
    fn of(resolved: &ResolveResult<'_>) -> Self {
        match resolved {
            ResolveResult::Bound(ns) if ns.as_ref() == METADATA_NS.as_bytes() => Self::Metadata,
            ResolveResult::Bound(ns) if ns.as_ref() == XMLDSIG_NS.as_bytes() => Self::XmlDsig,
            _ => Self::Other,
        }
    }
}

/// Parses an SP metadata document.
///
/// ## Errors
///
/// Returns an error if the XML is malformed, contains a DOCTYPE, is an
/// `EntitiesDescriptor` aggregate, lacks a metadata-namespace
/// `EntityDescriptor` or its `entityID`, has no `SPSSODescriptor`, or
/// declares no assertion consumer service.
pub fn parse(document: &str) -> MetadataResult<SpMetadata> {
    let mut reader = NsReader::from_str(document);
    reader.config_mut().trim_text(true);

    let mut state = ParseState::default();

    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        let ns = Ns::of(&resolved);
        match event {
            Event::Start(e) => {
                state.path.push((ns, e.local_name().as_ref().to_vec()));
                state.enter(&e)?;
            }
            Event::Empty(e) => {
                state.path.push((ns, e.local_name().as_ref().to_vec()));
                state.enter(&e)?;
                state.leave()?;
                state.path.pop();
            }
            Event::End(_) => {
                state.leave()?;
                state.path.pop();
            }
            Event::Text(e) => state.text.push_str(&e.unescape()?),
            Event::CData(e) => state.text.push_str(&String::from_utf8_lossy(&e)),
            Event::DocType(_) => {
                return Err(MetadataError::XmlParse(
                    "DOCTYPE declarations are not allowed".to_string(),
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    state.finish()
}

#[derive(Default)]
struct ParseState {
    path: Vec<(Ns, Vec<u8>)>,
    text: String,
    root_seen: bool,

    entity_id: Option<String>,
    id: Option<String>,
    valid_until: Option<DateTime<Utc>>,

    sp_seen: bool,
    sp_active: bool,
    authn_requests_signed: bool,
    want_assertions_signed: bool,
    key_usage: Option<KeyUsage>,
    key_certificate: Option<String>,
    key_descriptors: Vec<KeyDescriptor>,
    single_logout_services: Vec<Endpoint>,
    name_id_formats: Vec<String>,
    assertion_consumer_services: Vec<IndexedEndpoint>,
    attribute_consuming_service_index: Option<String>,

    signature: Option<MetadataSignature>,
    signature_active: bool,
}

impl ParseState {
    fn current(&self) -> (Ns, Vec<u8>) {
        self.path.last().cloned().unwrap_or_default()
    }

    fn within(&self, depth: usize, ns: Ns, name: &[u8]) -> bool {
        self.path.get(depth).is_some_and(|(n, local)| *n == ns && local == name)
    }

    fn in_sp(&self) -> bool {
        self.sp_active && self.within(1, Ns::Metadata, SP_SSO_DESCRIPTOR)
    }

    fn in_signature(&self) -> bool {
        self.signature_active && self.within(1, Ns::XmlDsig, SIGNATURE)
    }

    fn enter(&mut self, e: &BytesStart<'_>) -> MetadataResult<()> {
        self.text.clear();
        let depth = self.path.len();
        let (ns, name) = self.current();

        if depth == 1 {
            return self.enter_root(ns, &name, e);
        }

        if depth == 2 {
            match (ns, name.as_slice()) {
                (Ns::Metadata, SP_SSO_DESCRIPTOR) if !self.sp_seen => {
                    self.sp_seen = true;
                    self.sp_active = true;
                    self.authn_requests_signed = bool_attr(
                        e,
                        b"AuthnRequestsSigned",
                        "SPSSODescriptor@AuthnRequestsSigned",
                    )?
                    .unwrap_or(false);
                    self.want_assertions_signed = bool_attr(
                        e,
                        b"WantAssertionsSigned",
                        "SPSSODescriptor@WantAssertionsSigned",
                    )?
                    .unwrap_or(false);
                }
                (Ns::XmlDsig, SIGNATURE) if self.signature.is_none() => {
                    self.signature = Some(MetadataSignature::default());
                    self.signature_active = true;
                }
                _ => {}
            }
            return Ok(());
        }

        if self.in_sp() && depth == 3 {
            if ns != Ns::Metadata {
                return Ok(());
            }
            match name.as_slice() {
                KEY_DESCRIPTOR => {
                    self.key_usage = match attr(e, b"use")? {
                        Some(value) => Some(KeyUsage::parse(&value).ok_or_else(|| {
                            MetadataError::InvalidAttribute {
                                name: "KeyDescriptor@use".to_string(),
                                value,
                            }
                        })?),
                        None => None,
                    };
                    self.key_certificate = None;
                }
                b"SingleLogoutService" => {
                    self.single_logout_services
                        .push(endpoint(e, "SingleLogoutService")?);
                }
                b"AssertionConsumerService" => {
                    let index = match attr(e, b"index")? {
                        Some(value) => Some(value.trim().parse::<u32>().map_err(|_| {
                            MetadataError::InvalidAttribute {
                                name: "AssertionConsumerService@index".to_string(),
                                value,
                            }
                        })?),
                        None => None,
                    };
                    self.assertion_consumer_services.push(IndexedEndpoint {
                        endpoint: endpoint(e, "AssertionConsumerService")?,
                        index,
                        is_default: bool_attr(
                            e,
                            b"isDefault",
                            "AssertionConsumerService@isDefault",
                        )?,
                    });
                }
                b"AttributeConsumingService" => {
                    if self.attribute_consuming_service_index.is_none() {
                        self.attribute_consuming_service_index = attr(e, b"index")?;
                    }
                }
                _ => {}
            }
            return Ok(());
        }

        if self.in_signature() && ns == Ns::XmlDsig {
            let algorithm = || attr(e, b"Algorithm");
            if let Some(signature) = self.signature.as_mut() {
                match name.as_slice() {
                    b"Reference" if signature.reference_uri.is_none() => {
                        signature.reference_uri = attr(e, b"URI")?;
                    }
                    b"SignatureMethod" => signature.signature_method = algorithm()?,
                    b"DigestMethod" if signature.digest_method.is_none() => {
                        signature.digest_method = algorithm()?;
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn enter_root(&mut self, ns: Ns, name: &[u8], e: &BytesStart<'_>) -> MetadataResult<()> {
        if self.root_seen {
            return Err(MetadataError::XmlParse(
                "document has more than one root element".to_string(),
            ));
        }
        self.root_seen = true;

        match (ns, name) {
            (Ns::Metadata, ENTITY_DESCRIPTOR) => {}
            (Ns::Metadata, ENTITIES_DESCRIPTOR) => {
                return Err(MetadataError::NotServiceProvider(
                    "EntitiesDescriptor aggregates are not accepted".to_string(),
                ));
            }
            (_, ENTITY_DESCRIPTOR) => {
                return Err(MetadataError::NotServiceProvider(format!(
                    "EntityDescriptor is not in the {METADATA_NS} namespace"
                )));
            }
            _ => return Err(MetadataError::MissingElement("EntityDescriptor".to_string())),
        }

        self.entity_id = attr(e, b"entityID")?;
        self.id = attr(e, b"ID")?;
        self.valid_until = attr(e, b"validUntil")?
            .map(|value| parse_date_time(&value, "EntityDescriptor@validUntil"))
            .transpose()?;
        Ok(())
    }

    fn leave(&mut self) -> MetadataResult<()> {
        let depth = self.path.len();
        let text = std::mem::take(&mut self.text);
        let text = text.trim();
        let (ns, name) = self.current();

        if depth == 2 {
            match (ns, name.as_slice()) {
                (Ns::Metadata, SP_SSO_DESCRIPTOR) => self.sp_active = false,
                (Ns::XmlDsig, SIGNATURE) => self.signature_active = false,
                _ => {}
            }
            return Ok(());
        }

        if self.in_sp() {
            match (ns, name.as_slice()) {
                (Ns::Metadata, b"NameIDFormat") if depth == 3 && !text.is_empty() => {
                    self.name_id_formats.push(text.to_string());
                }
                (Ns::XmlDsig, X509_CERTIFICATE)
                    if self.within(2, Ns::Metadata, KEY_DESCRIPTOR)
                        && self.key_certificate.is_none() =>
                {
                    self.key_certificate = Some(text.to_string());
                }
                (Ns::Metadata, KEY_DESCRIPTOR) if depth == 3 => {
                    if let Some(certificate) = self.key_certificate.take() {
                        self.key_descriptors.push(KeyDescriptor {
                            usage: self.key_usage.take(),
                            certificate,
                        });
                    }
                }
                _ => {}
            }
            return Ok(());
        }

        if self.in_signature() && ns == Ns::XmlDsig {
            if let Some(signature) = self.signature.as_mut() {
                let slot = match name.as_slice() {
                    b"DigestValue" => &mut signature.digest_value,
                    b"SignatureValue" => &mut signature.signature_value,
                    X509_CERTIFICATE => &mut signature.certificate,
                    _ => return Ok(()),
                };
                if slot.is_none() {
                    *slot = Some(text.to_string());
                }
            }
        }

        Ok(())
    }

    fn finish(self) -> MetadataResult<SpMetadata> {
        if !self.path.is_empty() {
            return Err(MetadataError::XmlParse(
                "unexpected end of document".to_string(),
            ));
        }
        if !self.root_seen {
            return Err(MetadataError::MissingElement("EntityDescriptor".to_string()));
        }

        let entity_id = self
            .entity_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| MetadataError::MissingElement("EntityDescriptor@entityID".to_string()))?;

        if !self.sp_seen {
            return Err(MetadataError::NotServiceProvider(
                "no SPSSODescriptor present".to_string(),
            ));
        }
        if self.assertion_consumer_services.is_empty() {
            return Err(MetadataError::MissingElement(
                "AssertionConsumerService".to_string(),
            ));
        }

        Ok(SpMetadata {
            entity_id,
            id: self.id,
            valid_until: self.valid_until,
            authn_requests_signed: self.authn_requests_signed,
            want_assertions_signed: self.want_assertions_signed,
            key_descriptors: self.key_descriptors,
            single_logout_services: self.single_logout_services,
            name_id_formats: self.name_id_formats,
            assertion_consumer_services: self.assertion_consumer_services,
            attribute_consuming_service_index: self.attribute_consuming_service_index,
            signature: self.signature,
        })
    }
}

/// Returns the unescaped value of the unprefixed attribute with the given name.
fn attr(e: &BytesStart<'_>, name: &[u8]) -> MetadataResult<Option<String>> {
    for attribute in e.attributes() {
        let attribute = attribute?;
        if attribute.key.as_ref() == name {
            return Ok(Some(attribute.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn bool_attr(e: &BytesStart<'_>, name: &[u8], qualified: &str) -> MetadataResult<Option<bool>> {
    attr(e, name)?
        .map(|value| match value.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(MetadataError::InvalidAttribute {
                name: qualified.to_string(),
                value,
            }),
        })
        .transpose()
}

fn endpoint(e: &BytesStart<'_>, element: &str) -> MetadataResult<Endpoint> {
    let binding = attr(e, b"Binding")?
        .ok_or_else(|| MetadataError::MissingElement(format!("{element}@Binding")))?;
    let location = attr(e, b"Location")?
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .ok_or_else(|| MetadataError::MissingElement(format!("{element}@Location")))?;
    let response_location = attr(e, b"ResponseLocation")?
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());

    Ok(Endpoint {
        binding,
        location,
        response_location,
    })
}

/// Parses an `xs:dateTime`; a value without a zone is taken as UTC.
fn parse_date_time(value: &str, name: &str) -> MetadataResult<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc())
        })
        .map_err(|_| MetadataError::InvalidAttribute {
            name: name.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SamlBinding;

    const SP_METADATA: &str = include_str!("../../../testdata/metadata/sp.xml");
    const SIGNED_SP_METADATA: &str = include_str!("../../../testdata/metadata/sp_signed.xml");

    fn minimal(descriptor_body: &str) -> String {
        format!(
            r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="https://app.example.org">
                 <md:SPSSODescriptor protocolSupportEnumeration="urn:oasis:names:tc:SAML:2.0:protocol">
                   {descriptor_body}
                 </md:SPSSODescriptor>
               </md:EntityDescriptor>"#
        )
    }

    const ACS: &str = r#"<md:AssertionConsumerService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST" Location="https://app.example.org/acs" index="0"/>"#;

    #[test]
    fn parses_service_provider_metadata() {
        let metadata = parse(SP_METADATA).unwrap();

        assert_eq!(metadata.entity_id, "https://sp.example.com/saml");
        assert_eq!(metadata.id.as_deref(), Some("_sp-metadata"));
        assert!(metadata.authn_requests_signed);
        assert!(metadata.want_assertions_signed);
        assert_eq!(
            metadata.name_id_formats,
            vec![
                "urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress",
                "urn:oasis:names:tc:SAML:2.0:nameid-format:persistent",
            ]
        );
        assert_eq!(metadata.attribute_consuming_service_index.as_deref(), Some("3"));
        assert!(metadata.signature.is_none());

        assert_eq!(metadata.key_descriptors.len(), 2);
        assert_eq!(metadata.key_descriptors[0].usage, Some(KeyUsage::Signing));
        assert_eq!(metadata.key_descriptors[1].usage, Some(KeyUsage::Encryption));
        assert!(metadata.key_descriptors[0].certificate.starts_with("MIIBvTCC"));

        let acs = &metadata.assertion_consumer_services;
        assert_eq!(acs.len(), 2);
        assert_eq!(acs[0].endpoint.location, "https://sp.example.com/saml/acs");
        assert_eq!(acs[0].index, Some(1));
        assert_eq!(acs[0].is_default, Some(true));
        assert_eq!(acs[1].endpoint.saml_binding(), Some(SamlBinding::HttpArtifact));
        assert_eq!(acs[1].is_default, None);

        let slo = &metadata.single_logout_services[0];
        assert_eq!(slo.saml_binding(), Some(SamlBinding::HttpRedirect));
        assert_eq!(
            slo.response_location.as_deref(),
            Some("https://sp.example.com/saml/slo/response")
        );
    }

    #[test]
    fn extracts_enveloped_signature() {
        let metadata = parse(SIGNED_SP_METADATA).unwrap();
        let signature = metadata.signature.unwrap();

        assert_eq!(signature.reference_uri.as_deref(), Some("#_sp-metadata"));
        assert_eq!(
            signature.signature_method.as_deref(),
            Some("http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha256")
        );
        assert_eq!(
            signature.digest_method.as_deref(),
            Some("http://www.w3.org/2001/04/xmlenc#sha256")
        );
        assert!(signature.digest_value.is_some());
        assert!(signature.signature_value.is_some());
        assert!(signature.references("_sp-metadata"));
        // Signature key info is not mistaken for a key descriptor.
        assert_eq!(metadata.key_descriptors.len(), 2);
    }

    #[test]
    fn valid_until_is_parsed() {
        let document = minimal(ACS).replace(
            "entityID=",
            r#"validUntil="2030-01-01T00:00:00Z" entityID="#,
        );
        let metadata = parse(&document).unwrap();
        assert_eq!(
            metadata.valid_until.unwrap().to_rfc3339(),
            "2030-01-01T00:00:00+00:00"
        );
    }

    #[test]
    fn valid_until_without_zone_is_utc() {
        let document = minimal(ACS).replace(
            "entityID=",
            r#"validUntil="2030-01-01T00:00:00.000" entityID="#,
        );
        assert!(parse(&document).unwrap().valid_until.is_some());
    }

    #[test]
    fn rejects_entities_descriptor_aggregate() {
        let document = format!(
            r#"<md:EntitiesDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata">{}</md:EntitiesDescriptor>"#,
            minimal(ACS)
        );
        assert!(matches!(
            parse(&document),
            Err(MetadataError::NotServiceProvider(_))
        ));
    }

    #[test]
    fn rejects_missing_entity_id() {
        let document = minimal(ACS).replace(r#"entityID="https://app.example.org""#, "");
        assert!(matches!(
            parse(&document),
            Err(MetadataError::MissingElement(e)) if e == "EntityDescriptor@entityID"
        ));
    }

    #[test]
    fn rejects_identity_provider_metadata() {
        let document = r#"<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="https://idp.example.org">
              <md:IDPSSODescriptor protocolSupportEnumeration="urn:oasis:names:tc:SAML:2.0:protocol">
                <md:SingleSignOnService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect" Location="https://idp.example.org/sso"/>
              </md:IDPSSODescriptor>
            </md:EntityDescriptor>"#;
        assert!(matches!(
            parse(document),
            Err(MetadataError::NotServiceProvider(_))
        ));
    }

    #[test]
    fn rejects_descriptor_without_consumer_service() {
        let document = minimal(
            "<md:NameIDFormat>urn:oasis:names:tc:SAML:2.0:nameid-format:transient</md:NameIDFormat>",
        );
        assert!(matches!(
            parse(&document),
            Err(MetadataError::MissingElement(e)) if e == "AssertionConsumerService"
        ));
    }

    #[test]
    fn rejects_malformed_xml() {
        assert!(matches!(
            parse(&format!(
                r#"<md:EntityDescriptor xmlns:md="{METADATA_NS}" entityID="x"><md:SPSSODescriptor></md:EntityDescriptor>"#
            )),
            Err(MetadataError::XmlParse(_))
        ));
        assert!(matches!(
            parse(&format!(
                r#"<md:EntityDescriptor xmlns:md="{METADATA_NS}" entityID="x">"#
            )),
            Err(MetadataError::XmlParse(_))
        ));
    }

    #[test]
    fn rejects_doctype() {
        let document = format!(
            "<!DOCTYPE foo [<!ENTITY xxe SYSTEM \"file:///etc/passwd\">]>{}",
            minimal(ACS)
        );
        assert!(matches!(parse(&document), Err(MetadataError::XmlParse(_))));
    }

    #[test]
    fn rejects_empty_document() {
        assert!(matches!(parse(""), Err(MetadataError::MissingElement(_))));
    }

    #[test]
    fn rejects_unknown_key_use() {
        let document = minimal(&format!(
            r#"<md:KeyDescriptor use="decoration"><ds:KeyInfo xmlns:ds="http://www.w3.org/2000/09/xmldsig#"><ds:X509Data><ds:X509Certificate>AAAA</ds:X509Certificate></ds:X509Data></ds:KeyInfo></md:KeyDescriptor>{ACS}"#
        ));
        assert!(matches!(
            parse(&document),
            Err(MetadataError::InvalidAttribute { name, .. }) if name == "KeyDescriptor@use"
        ));
    }

    #[test]
    fn rejects_non_numeric_index() {
        let document = minimal(&ACS.replace(r#"index="0""#, r#"index="first""#));
        assert!(matches!(
            parse(&document),
            Err(MetadataError::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn only_first_sp_descriptor_is_read() {
        let document = r#"<EntityDescriptor xmlns="urn:oasis:names:tc:SAML:2.0:metadata" entityID="https://app.example.org">
              <SPSSODescriptor>
                <AssertionConsumerService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST" Location="https://app.example.org/first" index="0"/>
              </SPSSODescriptor>
              <SPSSODescriptor>
                <AssertionConsumerService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST" Location="https://app.example.org/second" index="0"/>
              </SPSSODescriptor>
            </EntityDescriptor>"#;
        let metadata = parse(document).unwrap();
        assert_eq!(metadata.assertion_consumer_services.len(), 1);
        assert_eq!(
            metadata.assertion_consumer_services[0].endpoint.location,
            "https://app.example.org/first"
        );
    }

    #[test]
    fn nested_signature_is_not_the_document_signature() {
        let document = minimal(&format!(
            r##"<ds:Signature xmlns:ds="http://www.w3.org/2000/09/xmldsig#"><ds:SignedInfo><ds:Reference URI="#x"/></ds:SignedInfo></ds:Signature>{ACS}"##
        ));
        assert!(parse(&document).unwrap().signature.is_none());
    }

    #[test]
    fn rejects_entity_descriptor_outside_metadata_namespace() {
        let document = minimal(ACS).replace(METADATA_NS, "urn:example:not-saml");
        assert!(matches!(
            parse(&document),
            Err(MetadataError::NotServiceProvider(_))
        ));
    }

    #[test]
    fn rejects_unnamespaced_entity_descriptor() {
        let document = r#"<EntityDescriptor entityID="https://app.example.org">
              <SPSSODescriptor>
                <AssertionConsumerService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST" Location="https://app.example.org/acs" index="0"/>
              </SPSSODescriptor>
            </EntityDescriptor>"#;
        assert!(matches!(
            parse(document),
            Err(MetadataError::NotServiceProvider(_))
        ));
    }

    #[test]
    fn descriptor_in_foreign_namespace_is_ignored() {
        let document = format!(
            r#"<md:EntityDescriptor xmlns:md="{METADATA_NS}" entityID="https://app.example.org">
                 <x:SPSSODescriptor xmlns:x="urn:example:not-saml">
                   <x:AssertionConsumerService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST" Location="https://app.example.org/acs" index="0"/>
                 </x:SPSSODescriptor>
               </md:EntityDescriptor>"#
        );
        assert!(matches!(
            parse(&document),
            Err(MetadataError::NotServiceProvider(_))
        ));
    }

    #[test]
    fn prefixed_id_attribute_is_not_the_descriptor_id() {
        let document = minimal(ACS).replace(
            "entityID=",
            r#"xmlns:foo="urn:example:foo" foo:ID="_forged" entityID="#,
        );
        assert_eq!(parse(&document).unwrap().id, None);
    }

    #[test]
    fn signature_in_foreign_namespace_is_ignored() {
        let document = minimal(ACS).replace(
            "<md:SPSSODescriptor",
            r##"<x:Signature xmlns:x="urn:example:not-dsig"><x:SignedInfo><x:Reference URI="#x"/></x:SignedInfo></x:Signature><md:SPSSODescriptor"##,
        );
        assert!(parse(&document).unwrap().signature.is_none());
    }

    #[test]
    fn default_namespace_binds_metadata_elements() {
        let document = r#"<EntityDescriptor xmlns="urn:oasis:names:tc:SAML:2.0:metadata" entityID="https://app.example.org">
              <SPSSODescriptor>
                <AssertionConsumerService Binding="urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST" Location="https://app.example.org/acs" index="0"/>
              </SPSSODescriptor>
            </EntityDescriptor>"#;
        assert_eq!(parse(document).unwrap().assertion_consumer_services.len(), 1);
    }
}
