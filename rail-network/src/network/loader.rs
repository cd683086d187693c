//! Network loader: edge records → adjacency graph.

use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use super::{Graph, LoadError};
use crate::dataset::{Dataset, EdgeRecord, edge_records};
use crate::domain::{Edge, ParseError, RouteCode, Station};

/// What to do with a record that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidRecordPolicy {
    /// Drop the record, remember it in [`LoadedNetwork::skipped`] and carry on.
    #[default]
    Skip,
    /// Abort the whole load with [`LoadError::InvalidRecord`].
    Fail,
}

/// Configuration for the network loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// Handling of malformed records.
    pub on_invalid: InvalidRecordPolicy,
}

impl LoaderConfig {
    /// Create a configuration with the given invalid-record policy.
    pub fn new(on_invalid: InvalidRecordPolicy) -> Self {
        Self { on_invalid }
    }
}

/// A record dropped during loading.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// Zero-based position of the record in the input
    pub index: usize,
    /// Why it was rejected
    pub error: ParseError,
}

/// Everything produced by one load.
#[derive(Debug, Clone, Default)]
pub struct LoadedNetwork {
    /// The adjacency graph
    pub graph: Graph,
    /// Every operator seen on an accepted record
    pub operators: BTreeSet<String>,
    /// Every route code seen on an accepted record
    pub route_codes: BTreeSet<RouteCode>,
    /// Records dropped under [`InvalidRecordPolicy::Skip`]
    pub skipped: Vec<SkippedRecord>,
}

/// Builds graphs from edge records.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a loader with the given configuration.
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Build a network from edge records.
    ///
    /// Records are not assumed to be de-duplicated: every accepted record
    /// inserts exactly one forward and one reverse edge.
    pub fn load<I>(&self, records: I) -> Result<LoadedNetwork, LoadError>
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        let mut builder = NetworkBuilder::new(&self.config);
        for (index, record) in records.into_iter().enumerate() {
            builder.accept(index, Ok(record))?;
        }
        Ok(builder.finish())
    }

    /// Build a network from the route table.
    pub fn load_dataset(&self, dataset: &Dataset) -> Result<LoadedNetwork, LoadError> {
        self.load(edge_records(dataset))
    }

    /// Build a network from CSV text with a header row.
    ///
    /// Rows that cannot be deserialized count as malformed records and follow
    /// the configured policy. I/O failures always abort.
    pub fn load_csv<R: Read>(&self, reader: R) -> Result<LoadedNetwork, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut builder = NetworkBuilder::new(&self.config);
        for (index, row) in csv_reader.deserialize::<EdgeRecord>().enumerate() {
            let record = match row {
                Ok(record) => Ok(record),
                Err(e) if e.is_io_error() => return Err(LoadError::Csv(e)),
                Err(e) => Err(ParseError::MalformedRecord(e.to_string())),
            };
            builder.accept(index, record)?;
        }
        Ok(builder.finish())
    }

    /// Build a network from a CSV file.
    pub fn load_csv_path(&self, path: impl AsRef<Path>) -> Result<LoadedNetwork, LoadError> {
        let file = std::fs::File::open(path.as_ref()).map_err(csv::Error::from)?;
        self.load_csv(file)
    }
}

/// Accumulates accepted records into adjacency lists.
struct NetworkBuilder<'a> {
    config: &'a LoaderConfig,
    adjacency: HashMap<Station, Vec<Edge>>,
    operators: BTreeSet<String>,
    route_codes: BTreeSet<RouteCode>,
    skipped: Vec<SkippedRecord>,
}

impl<'a> NetworkBuilder<'a> {
    fn new(config: &'a LoaderConfig) -> Self {
        Self {
            config,
            adjacency: HashMap::new(),
            operators: BTreeSet::new(),
            route_codes: BTreeSet::new(),
            skipped: Vec::new(),
        }
    }

    fn accept(
        &mut self,
        index: usize,
        record: Result<EdgeRecord, ParseError>,
    ) -> Result<(), LoadError> {
        match record.and_then(|r| r.validate()) {
            Ok((from, edge)) => {
                self.insert(from, edge);
                Ok(())
            }
            Err(error) => match self.config.on_invalid {
                InvalidRecordPolicy::Fail => Err(LoadError::InvalidRecord {
                    index,
                    source: error,
                }),
                InvalidRecordPolicy::Skip => {
                    warn!(index, error = %error, "Skipping invalid edge record");
                    self.skipped.push(SkippedRecord { index, error });
                    Ok(())
                }
            },
        }
    }

    fn insert(&mut self, from: Station, edge: Edge) {
        if !edge.operator.is_empty() {
            self.operators.insert(edge.operator.clone());
        }
        self.route_codes.insert(edge.route.clone());

        let reverse = edge.reversed(from.clone());
        let to = edge.to.clone();
        self.adjacency.entry(from).or_default().push(edge);
        self.adjacency.entry(to).or_default().push(reverse);
    }

    fn finish(self) -> LoadedNetwork {
        let graph = Graph::from_adjacency(self.adjacency);
        debug!(
            stations = graph.station_count(),
            edges = graph.edge_count(),
            operators = self.operators.len(),
            routes = self.route_codes.len(),
            skipped = self.skipped.len(),
            "Network loaded"
        );

        LoadedNetwork {
            graph,
            operators: self.operators,
            route_codes: self.route_codes,
            skipped: self.skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Minutes;
    use std::io::Write;

    fn record(line: &str, from: &str, to: &str, time: &str) -> EdgeRecord {
        EdgeRecord {
            operator: "Metro".into(),
            line: line.into(),
            from_station: from.into(),
            to_station: to.into(),
            travel_time_min: time.into(),
            service_type: "Stopper".into(),
            ..EdgeRecord::default()
        }
    }

    const CSV: &str = "\
operator,line,from_station,to_station,travel_time_min,service_type,route_origin,route_destination
Stepford Connect,R001,Benton,Morganstown,4.0,Stopper,Benton,Newry
Stepford Connect,R001,Morganstown,Newry,4.0,Stopper,Benton,Newry
Metro,R010,Benton,Newry,6,Express,Benton,Newry
";

    #[test]
    fn each_record_inserts_two_edges() {
        let network = Loader::default()
            .load(vec![record("R1", "A", "B", "5"), record("R1", "B", "C", "5")])
            .unwrap();
        let graph = &network.graph;

        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.station_count(), 3);
        assert_eq!(graph.edges_from("A").len(), 1);
        assert_eq!(graph.edges_from("B").len(), 2);
        assert_eq!(graph.edges_from("A")[0].to.as_str(), "B");
        assert_eq!(graph.edges_from("C")[0].to.as_str(), "B");
    }

    #[test]
    fn duplicates_are_not_collapsed() {
        let network = Loader::default()
            .load(vec![record("R1", "A", "B", "5"), record("R1", "A", "B", "5")])
            .unwrap();
        assert_eq!(network.graph.edges_from("A").len(), 2);
    }

    #[test]
    fn reverse_edge_shares_metadata() {
        let network = Loader::default()
            .load(vec![record("R7", "A", "B", "7.5")])
            .unwrap();
        let forward = &network.graph.edges_from("A")[0];
        let reverse = &network.graph.edges_from("B")[0];

        assert_eq!(forward.route, reverse.route);
        assert_eq!(forward.operator, reverse.operator);
        assert_eq!(forward.service_type, reverse.service_type);
        assert_eq!(forward.time, Minutes::new(7.5).unwrap());
        assert_eq!(forward.time, reverse.time);
    }

    #[test]
    fn operator_and_route_sets() {
        let mut other = record("R2", "B", "C", "5");
        other.operator = "AirLink".into();
        let network = Loader::default()
            .load(vec![record("R1", "A", "B", "5"), other])
            .unwrap();

        let operators: Vec<&str> = network.operators.iter().map(String::as_str).collect();
        assert_eq!(operators, vec!["AirLink", "Metro"]);
        let codes: Vec<&str> = network.route_codes.iter().map(RouteCode::as_str).collect();
        assert_eq!(codes, vec!["R1", "R2"]);
    }

    #[test]
    fn blank_operator_not_in_operator_set() {
        let mut anonymous = record("R2", "B", "C", "5");
        anonymous.operator = "  ".into();
        let network = Loader::default()
            .load(vec![record("R1", "A", "B", "5"), anonymous])
            .unwrap();

        let operators: Vec<&str> = network.operators.iter().map(String::as_str).collect();
        assert_eq!(operators, vec!["Metro"]);
        assert!(network.graph.operators_at("C").is_empty());
    }

    #[test]
    fn skip_policy_collects_bad_records() {
        let network = Loader::default()
            .load(vec![
                record("R1", "A", "B", "5"),
                record("R1", "B", "C", "about a while"),
                record("R1", "C", "D", "5"),
            ])
            .unwrap();

        assert_eq!(network.skipped.len(), 1);
        assert_eq!(network.skipped[0].index, 1);
        assert!(matches!(
            network.skipped[0].error,
            ParseError::InvalidTravelTime { .. }
        ));
        assert!(network.graph.contains("D"));
        assert!(network.graph.edges_from("B").iter().all(|e| e.to.as_str() != "C"));
    }

    #[test]
    fn fail_policy_aborts() {
        let loader = Loader::new(LoaderConfig::new(InvalidRecordPolicy::Fail));
        let err = loader
            .load(vec![record("R1", "A", "B", "5"), record("R1", "", "C", "5")])
            .unwrap_err();

        assert!(matches!(err, LoadError::InvalidRecord { index: 1, .. }));
    }

    #[test]
    fn load_csv_text() {
        let network = Loader::default().load_csv(CSV.as_bytes()).unwrap();

        assert!(network.skipped.is_empty());
        assert_eq!(network.graph.station_count(), 3);
        assert_eq!(network.graph.edge_count(), 6);
        let edge = &network.graph.edges_from("Benton")[0];
        assert_eq!(edge.route_origin.as_ref().map(Station::as_str), Some("Benton"));
        assert_eq!(edge.route_destination.as_ref().map(Station::as_str), Some("Newry"));
    }

    #[test]
    fn csv_short_rows_use_defaults() {
        let text = "operator,line,from_station,to_station,travel_time_min,service_type\n\
                    Metro,R1,A,B,5,Stopper\n";
        let network = Loader::default().load_csv(text.as_bytes()).unwrap();

        let edge = &network.graph.edges_from("A")[0];
        assert_eq!(edge.route_origin, None);
        assert_eq!(edge.service_type, "Stopper");
    }

    #[test]
    fn csv_malformed_row_skipped() {
        let text = "operator,line,from_station,to_station,travel_time_min\n\
                    Metro,R1,A,B,5\n\
                    Metro,R1\n\
                    Metro,R1,B,C,5\n";
        let network = Loader::default().load_csv(text.as_bytes()).unwrap();

        assert_eq!(network.skipped.len(), 1);
        assert!(matches!(
            network.skipped[0].error,
            ParseError::MalformedRecord(_)
        ));
        assert_eq!(network.graph.edge_count(), 4);
    }

    #[test]
    fn load_csv_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let network = Loader::default().load_csv_path(file.path()).unwrap();
        assert_eq!(network.route_codes.len(), 2);
    }

    #[test]
    fn missing_csv_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Loader::default()
            .load_csv_path(dir.path().join("rail_routes.csv"))
            .unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn loading_twice_is_identical() {
        let first = Loader::default().load_csv(CSV.as_bytes()).unwrap();
        let second = Loader::default().load_csv(CSV.as_bytes()).unwrap();

        for station in first.graph.stations() {
            assert_eq!(
                first.graph.edges_from(station.as_str()),
                second.graph.edges_from(station.as_str())
            );
        }
        assert_eq!(first.operators, second.operators);
    }
}
