//! Predicates and classes of the authorization vocabulary.

use crate::types::Iri;

pub const AUTH_NS: &str = "http://vitro.mannlib.cornell.edu/ns/vitro/authorization#";

pub const RDF_TYPE: Iri = Iri::from_static("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
pub const RDFS_LABEL: Iri = Iri::from_static("http://www.w3.org/2000/01/rdf-schema#label");

// Classes
pub const USER_ACCOUNT: Iri =
    Iri::from_static("http://vitro.mannlib.cornell.edu/ns/vitro/authorization#UserAccount");
pub const ROOT_USER_ACCOUNT: Iri =
    Iri::from_static("http://vitro.mannlib.cornell.edu/ns/vitro/authorization#RootUserAccount");
pub const PERMISSION_SET: Iri =
    Iri::from_static("http://vitro.mannlib.cornell.edu/ns/vitro/authorization#PermissionSet");

// User account properties
pub const EMAIL_ADDRESS: Iri =
    Iri::from_static("http://vitro.mannlib.cornell.edu/ns/vitro/authorization#emailAddress");
pub const FIRST_NAME: Iri =
    Iri::from_static("http://vitro.mannlib.cornell.edu/ns/vitro/authorization#firstName");
pub const LAST_NAME: Iri =
    Iri::from_static("http://vitro.mannlib.cornell.edu/ns/vitro/authorization#lastName");
pub const MD5_PASSWORD: Iri =
    Iri::from_static("http://vitro.mannlib.cornell.edu/ns/vitro/authorization#md5password");
pub const OLD_PASSWORD: Iri =
    Iri::from_static("http://vitro.mannlib.cornell.edu/ns/vitro/authorization#oldPassword");
pub const PASSWORD_LINK_EXPIRES: Iri = Iri::from_static(
    "http://vitro.mannlib.cornell.edu/ns/vitro/authorization#passwordLinkExpires",
);
pub const PASSWORD_CHANGE_REQUIRED: Iri = Iri::from_static(
    "http://vitro.mannlib.cornell.edu/ns/vitro/authorization#passwordChangeRequired",
);
pub const LOGIN_COUNT: Iri =
    Iri::from_static("http://vitro.mannlib.cornell.edu/ns/vitro/authorization#loginCount");
pub const STATUS: Iri =
    Iri::from_static("http://vitro.mannlib.cornell.edu/ns/vitro/authorization#status");
pub const EXTERNAL_AUTH_ID: Iri =
    Iri::from_static("http://vitro.mannlib.cornell.edu/ns/vitro/authorization#externalAuthId");
pub const HAS_PERMISSION_SET: Iri =
    Iri::from_static("http://vitro.mannlib.cornell.edu/ns/vitro/authorization#hasPermissionSet");

// Permission set properties
pub const HAS_PERMISSION: Iri =
    Iri::from_static("http://vitro.mannlib.cornell.edu/ns/vitro/authorization#hasPermission");
