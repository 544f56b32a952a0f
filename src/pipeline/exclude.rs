//! External-module exclusion tables.
//!
//! Modules the runtime binary already embeds must not be bundled into the
//! handler, or the bundled copy shadows the embedded one. Which modules
//! those are depends on the SDK feature set baked into the binary.

use crate::variant::FeatureSet;

/// Excluded for every SDK-carrying variant: the two SDK namespaces plus the
/// vendored `uuid`.
pub const COMMON_EXCLUSIONS: [&str; 3] = ["@aws-sdk/*", "@smithy/*", "uuid"];

/// SDK clients embedded in the standard binary.
const STANDARD_SDK_PACKAGES: [&str; 25] = [
    "@aws-sdk/client-cloudwatch-events",
    "@aws-sdk/client-cloudwatch-logs",
    "@aws-sdk/client-cognito-identity",
    "@aws-sdk/client-cognito-identity-provider",
    "@aws-sdk/client-dynamodb",
    "@aws-sdk/client-eventbridge",
    "@aws-sdk/client-firehose",
    "@aws-sdk/client-kinesis",
    "@aws-sdk/client-kms",
    "@aws-sdk/client-lambda",
    "@aws-sdk/client-s3",
    "@aws-sdk/client-secrets-manager",
    "@aws-sdk/client-ses",
    "@aws-sdk/client-sfn",
    "@aws-sdk/client-sns",
    "@aws-sdk/client-sqs",
    "@aws-sdk/client-ssm",
    "@aws-sdk/client-sso",
    "@aws-sdk/client-sso-oidc",
    "@aws-sdk/client-sts",
    "@aws-sdk/client-xray",
    "@aws-sdk/credential-providers",
    "@aws-sdk/lib-dynamodb",
    "@aws-sdk/s3-request-presigner",
    "@aws-sdk/util-dynamodb",
];

/// The external-module list for a feature set, de-duplicated, in table
/// order.
pub fn external_modules(feature_set: FeatureSet) -> Vec<String> {
    let entries: Vec<&str> = match feature_set {
        FeatureSet::None => Vec::new(),
        FeatureSet::Full => COMMON_EXCLUSIONS.to_vec(),
        FeatureSet::Standard => STANDARD_SDK_PACKAGES
            .iter()
            .chain(COMMON_EXCLUSIONS.iter())
            .copied()
            .collect(),
    };

    let mut seen = std::collections::HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(*entry))
        .map(String::from)
        .collect()
}
