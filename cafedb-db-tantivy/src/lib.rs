use std::{fs, path::Path, sync::Arc};

use anyhow::Result as Fallible;
use cafedb_core::{
    db::{Indexer, LocationIndex, LocationIndexer},
    entities::{Id, Location},
};
use parking_lot::Mutex;
use tantivy::{
    collector::TopDocs,
    directory::MmapDirectory,
    doc,
    query::QueryParser,
    schema::{Field, Schema, Value as _, STORED, STRING, TEXT},
    Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term,
};

const OVERALL_INDEX_HEAP_SIZE_IN_BYTES: usize = 50_000_000;

// Matching names are more relevant than matching states or countries.
const NAME_BOOST: f32 = 2.0;

struct LocationFields {
    id: Field,
    name: Field,
    state: Field,
    country: Field,
}

fn build_schema() -> (Schema, LocationFields) {
    let mut schema_builder = Schema::builder();
    let id = schema_builder.add_text_field("id", STRING | STORED);
    let name = schema_builder.add_text_field("name", TEXT);
    let state = schema_builder.add_text_field("state", TEXT);
    let country = schema_builder.add_text_field("country", TEXT);
    let fields = LocationFields {
        id,
        name,
        state,
        country,
    };
    (schema_builder.build(), fields)
}

pub(crate) struct TantivyLocationIndex {
    fields: LocationFields,
    reader: IndexReader,
    writer: IndexWriter,
    text_query_parser: QueryParser,
}

impl TantivyLocationIndex {
    pub fn create_in_ram() -> Fallible<Self> {
        let no_path: Option<&Path> = None;
        Self::create(no_path)
    }

    pub fn create<P: AsRef<Path>>(path: Option<P>) -> Fallible<Self> {
        let (schema, fields) = build_schema();
        let index = if let Some(path) = path {
            let path = path.as_ref();
            log::info!(
                "Opening full-text search index in directory: {}",
                path.display()
            );
            fs::create_dir_all(path)?;
            Index::open_or_create(MmapDirectory::open(path)?, schema)?
        } else {
            log::warn!("Creating full-text search index in RAM");
            Index::create_in_ram(schema)
        };
        let writer = index.writer(OVERALL_INDEX_HEAP_SIZE_IN_BYTES)?;
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;
        let mut text_query_parser =
            QueryParser::for_index(&index, vec![fields.name, fields.state, fields.country]);
        text_query_parser.set_field_boost(fields.name, NAME_BOOST);
        Ok(Self {
            fields,
            reader,
            writer,
            text_query_parser,
        })
    }
}

impl Indexer for TantivyLocationIndex {
    fn flush_index(&mut self) -> Fallible<()> {
        self.writer.commit()?;
        self.reader.reload()?;
        Ok(())
    }
}

impl LocationIndex for TantivyLocationIndex {
    fn query_locations(&self, text: &str, limit: usize) -> Fallible<Vec<Id>> {
        let text = text.trim();
        if text.is_empty() || limit == 0 {
            return Ok(vec![]);
        }
        // Search terms are user input and must never fail
        let (query, errors) = self.text_query_parser.parse_query_lenient(text);
        for err in errors {
            log::debug!("Ignoring invalid query text '{text}': {err}");
        }
        let searcher = self.reader.searcher();
        let top_docs = searcher.search(&query, &TopDocs::with_limit(limit))?;
        let mut ids = Vec::with_capacity(top_docs.len());
        for (_score, doc_addr) in top_docs {
            let doc = match searcher.doc::<TantivyDocument>(doc_addr) {
                Ok(doc) => doc,
                Err(err) => {
                    log::warn!("Failed to load document {doc_addr:?}: {err}");
                    continue;
                }
            };
            match doc.get_first(self.fields.id).and_then(|val| val.as_str()) {
                Some(id) => ids.push(Id::from(id)),
                None => log::error!("Missing location id in document {doc_addr:?}"),
            }
        }
        Ok(ids)
    }
}

impl LocationIndexer for TantivyLocationIndex {
    fn add_or_update_location(&self, location: &Location) -> Fallible<()> {
        let id = location.id.as_str();
        self.writer
            .delete_term(Term::from_field_text(self.fields.id, id));
        let mut doc = doc!(
            self.fields.id => id,
            self.fields.name => location.name.as_str()
        );
        if let Some(state) = &location.state {
            doc.add_text(self.fields.state, state);
        }
        if let Some(country) = &location.country {
            doc.add_text(self.fields.country, country);
        }
        self.writer.add_document(doc)?;
        Ok(())
    }

    fn remove_all_locations(&self) -> Fallible<()> {
        self.writer.delete_all_documents()?;
        Ok(())
    }
}

/// Shared handle of the location index.
#[derive(Clone)]
pub struct SearchEngine(Arc<Mutex<Box<dyn LocationIndexer + Send>>>);

impl SearchEngine {
    pub fn init_in_ram() -> Fallible<SearchEngine> {
        let location_index = TantivyLocationIndex::create_in_ram()?;
        Ok(SearchEngine(Arc::new(Mutex::new(Box::new(location_index)))))
    }

    pub fn init_with_path<P: AsRef<Path>>(path: Option<P>) -> Fallible<SearchEngine> {
        let location_index = TantivyLocationIndex::create(path)?;
        Ok(SearchEngine(Arc::new(Mutex::new(Box::new(location_index)))))
    }
}

impl Indexer for SearchEngine {
    fn flush_index(&mut self) -> Fallible<()> {
        self.0.lock().flush_index()
    }
}

impl LocationIndex for SearchEngine {
    fn query_locations(&self, text: &str, limit: usize) -> Fallible<Vec<Id>> {
        self.0.lock().query_locations(text, limit)
    }
}

impl LocationIndexer for SearchEngine {
    fn add_or_update_location(&self, location: &Location) -> Fallible<()> {
        self.0.lock().add_or_update_location(location)
    }

    fn remove_all_locations(&self) -> Fallible<()> {
        self.0.lock().remove_all_locations()
    }
}
