//! Package fixtures
//!
//! Two index definitions in two versions each:
//! - `jcrMimeType`: a flat property index; version 2 changes its
//!   property list
//! - `ntFile`: a lucene index with child nodes; version 2 adds an
//!   `aggregates` subtree

use reindex_hook::store::PropertyValue;

use super::harness::Package;

pub const MIME_TYPE_INDEX: &str = "/oak:index/jcrMimeType";
pub const NT_FILE_INDEX: &str = "/oak:index/ntFile";

fn s(value: &str) -> PropertyValue {
    PropertyValue::String(value.to_string())
}

fn container() -> Package {
    Package::new("/oak:index").node("/oak:index", &[])
}

pub fn property_index_v1() -> Package {
    container().node(
        MIME_TYPE_INDEX,
        &[
            ("jcr:primaryType", s("oak:QueryIndexDefinition")),
            ("type", s("property")),
            ("propertyNames", s("jcr:mimeType")),
        ],
    )
}

pub fn property_index_v2() -> Package {
    container().node(
        MIME_TYPE_INDEX,
        &[
            ("jcr:primaryType", s("oak:QueryIndexDefinition")),
            ("type", s("property")),
            ("propertyNames", s("jcr:mimeType,jcr:encoding")),
        ],
    )
}

pub fn lucene_index_v1() -> Package {
    container()
        .node(
            NT_FILE_INDEX,
            &[
                ("jcr:primaryType", s("oak:QueryIndexDefinition")),
                ("type", s("lucene")),
                ("async", s("async")),
            ],
        )
        .node(&format!("{}/indexRules", NT_FILE_INDEX), &[])
        .node(
            &format!("{}/indexRules/nt:file", NT_FILE_INDEX),
            &[("indexNodeName", PropertyValue::Boolean(true))],
        )
}

pub fn lucene_index_v2() -> Package {
    lucene_index_v1()
        .node(&format!("{}/aggregates", NT_FILE_INDEX), &[])
        .node(
            &format!("{}/aggregates/nt:file", NT_FILE_INDEX),
            &[("path", s("jcr:content"))],
        )
}
