//! Queries against tensile test data described with the PMD core ontology (pmdco v2.0.7) and the
//! tensile test application ontology.

use crate::SparqlQuery;

pub const QUERY_NAMES: [&str; 10] = [
    "material_designation",
    "process_type",
    "orientation",
    "standard",
    "extensiometer",
    "specimen_id",
    "csv_url",
    "primary_data",
    "secondary_data",
    "metadata",
];

/// Looks up a catalog query by name. `uri` narrows the per-process queries
/// (`primary_data`, `secondary_data`, `metadata`) and is ignored by the others.
pub fn by_name(name: &str, uri: Option<&str>) -> Option<SparqlQuery> {
    let query = match name {
        "material_designation" => material_designation(),
        "process_type" => process_type(),
        "orientation" => orientation(),
        "standard" => standard(),
        "extensiometer" => extensiometer(),
        "specimen_id" => specimen_id(),
        "csv_url" => csv_url(),
        "primary_data" => primary_data(uri),
        "secondary_data" => secondary_data(uri),
        "metadata" => metadata(uri),
        _ => return None,
    };
    Some(query)
}

/// Value of the material designation of each tested piece.
pub fn material_designation() -> SparqlQuery {
    let query = r#"
    PREFIX pmd: <https://w3id.org/pmd/co/>
    SELECT DISTINCT ?p ?matDesVal
    WHERE {
        ?s a pmd:TestPiece .
        ?p pmd:input ?s .
        ?p pmd:characteristic ?matDes .
        ?matDes a pmd:materialDesignation .
        ?matDes pmd:value ?matDesVal .
    }
    ORDER BY ?p
    "#;
    SparqlQuery::new(query, vec!["URI", "materialDesignation"])
}

/// Types of the processes run on S355 material.
pub fn process_type() -> SparqlQuery {
    let query = r#"
    PREFIX pmd: <https://w3id.org/pmd/co/>
    PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>
    SELECT distinct ?p ?type
    WHERE {
        ?p a ?type .
        ?matDes a pmd:materialDesignation .
        ?matDes pmd:value "S355"^^xsd:string .
        ?p pmd:characteristic ?matDes .
    }
    ORDER BY ?p
    "#;
    SparqlQuery::new(query, vec!["URI", "Process type"])
}

/// Orientation the specimen was cut in, relative to the rolling direction of the raw material.
pub fn orientation() -> SparqlQuery {
    let query = r#"
    PREFIX pmd: <https://w3id.org/pmd/co/>
    SELECT distinct ?p ?rollingDirection
    WHERE {
        ?s a pmd:TestPiece .
        ?p a pmd:TensileTest .
        ?p pmd:input ?s .
        ?p pmd:characteristic ?characteristic .
        ?characteristic a pmd:MaterialRelated .
        ?characteristic pmd:value ?rollingDirection .
    }
    ORDER BY ?p
    "#;
    SparqlQuery::new(query, vec!["URI", "cut orientation"])
}

/// Extensometer model and the standard applied during the test.
pub fn standard() -> SparqlQuery {
    let query = r#"
    PREFIX pmd: <https://w3id.org/pmd/co/>
    SELECT distinct ?p ?extensometerNameVal ?extensometerStandardVal
    WHERE {
        ?s a pmd:TestPiece .
        ?p a pmd:TensileTest .
        ?p pmd:input ?s .
        ?p pmd:characteristic ?metadata .
        ?extensometerName a pmd:NodeName .
        ?extensometerName pmd:value ?extensometerNameVal .
        ?extensometerStandard a pmd:Norm .
        ?extensometerStandard pmd:value ?extensometerStandardVal .
        FILTER (?extensometerName!=<https://w3id.org/pmd/ao/tte/_machineName>)
        FILTER (?extensometerStandard=<https://w3id.org/pmd/ao/tte/_extensometerStandard>)
    }
    ORDER BY ?p
    "#;
    SparqlQuery::new(query, vec!["URI", "Extensiometer model", "Standard"])
}

pub fn extensiometer() -> SparqlQuery {
    let query = r#"
    PREFIX pmd: <https://w3id.org/pmd/co/>
    SELECT distinct ?p ?extensometerNameVal
    WHERE {
    ?s a pmd:TestPiece .
    ?p a pmd:TensileTest .
    ?p pmd:input ?s .
    ?p pmd:characteristic ?metadata .
    ?extensometerName a pmd:NodeName .
    ?extensometerName pmd:value ?extensometerNameVal .
    FILTER (?extensometerName!=<https://w3id.org/pmd/ao/tte/_machineName>)
    } ORDER BY ?p
    "#;
    SparqlQuery::new(query, vec!["URI", "Extensiometer model"])
}

pub fn specimen_id() -> SparqlQuery {
    let query = r#"
    PREFIX pmd: <https://w3id.org/pmd/co/>
    SELECT distinct ?p ?s
    WHERE {
    ?s a pmd:TestPiece .
    ?p a pmd:TensileTest .
    ?p pmd:input ?s .
    } ORDER BY ?p
    "#;
    SparqlQuery::new(query, vec!["URI", "Specimen ID"])
}

/// URL of the csv file holding the stress-strain data of each test.
pub fn csv_url() -> SparqlQuery {
    let query = r#"
    PREFIX base: <https://w3id.org/pmd/co/>
    PREFIX csvw: <http://www.w3.org/ns/csvw#>
    SELECT ?p ?url
    WHERE {
        ?p a base:TensileTest .
        ?p base:characteristic ?dataset .
        ?dataset a base:Dataset .
        ?dataset base:resource ?table .
        ?table a csvw:Table .
        ?table csvw:url ?url .
    }
    ORDER BY ?p
    "#;
    SparqlQuery::new(query, vec!["URI", "URL"])
}

pub fn primary_data(uri: Option<&str>) -> SparqlQuery {
    characteristic_values("PrimaryData", uri)
}

pub fn secondary_data(uri: Option<&str>) -> SparqlQuery {
    characteristic_values("SecondaryData", uri)
}

pub fn metadata(uri: Option<&str>) -> SparqlQuery {
    characteristic_values("Metadata", uri)
}

// Value and unit of every characteristic of the given class, optionally for processes matching `uri` only.
fn characteristic_values(characteristic_class: &str, uri: Option<&str>) -> SparqlQuery {
    let filter_clause = match uri {
        Some(uri) => format!(r#"FILTER regex(str(?p), "{}")"#, escape_string_literal(uri)),
        None => String::new(),
    };
    let query = format!(
        r#"
    PREFIX pmd: <https://w3id.org/pmd/co/>
    SELECT DISTINCT ?p ?o ?v ?u
    WHERE {{
        ?s a pmd:TestPiece .
        ?p a pmd:TensileTest .
        ?p pmd:input ?s .
        ?p pmd:characteristic ?o .
        ?o a pmd:{} .
        ?o pmd:value ?v .
        ?o pmd:unit ?u .
        {}
    }} ORDER BY ?p
    "#,
        characteristic_class, filter_clause
    );
    SparqlQuery::new(query, vec!["URI", "Quantity", "value", "unit"])
}

/// Escapes `value` for use inside a double quoted SPARQL string literal.
fn escape_string_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    escaped
}
