/// The only two internal failure modes the binder allows: PEM parsing of
/// a certificate secret, and JSON marshaling of the gateway-class
/// annotation snapshot. Neither ever escapes the binder as a `Result::Err`
/// — both are logged and folded into a condition or a fallback payload at
/// their call site.
#[derive(Clone, Debug, thiserror::Error)]
pub enum BindError {
    #[error("failed to parse certificate secret {0} as PEM: {1}")]
    CertificatePem(crate::resource_id::ResourceId, String),

    #[error("failed to encode gateway-class-config annotation: {0}")]
    AnnotationEncode(String),
}
