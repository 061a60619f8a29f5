use crate::models::{GeoPoint, GetRentalsParams, SortKey};

pub const EARTH_RADIUS_MILES: f64 = 3959.0;
pub const NEAR_RADIUS_MILES: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SqlArg {
    Int4(i32),
    Int8(i64),
    Float8(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RentalFilter {
    IdIn(Vec<i32>),
    PriceAtLeast(i64),
    PriceAtMost(i64),
    Near(GeoPoint),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RentalQuery {
    pub filters: Vec<RentalFilter>,
    pub sort: Option<SortKey>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedQuery {
    pub sql: String,
    pub args: Vec<SqlArg>,
}

#[derive(Default)]
struct Placeholders {
    args: Vec<SqlArg>,
}

impl Placeholders {
    fn bind(&mut self, arg: SqlArg) -> String {
        self.args.push(arg);
        format!("${}", self.args.len())
    }
}

impl RentalQuery {
    pub fn from_params(params: &GetRentalsParams) -> Self {
        let mut filters = Vec::new();

        if !params.ids.is_empty() {
            filters.push(RentalFilter::IdIn(params.ids.clone()));
        }
        if let Some(min) = params.price_min.filter(|v| *v > 0) {
            filters.push(RentalFilter::PriceAtLeast(min));
        }
        if let Some(max) = params.price_max.filter(|v| *v > 0) {
            filters.push(RentalFilter::PriceAtMost(max));
        }
        if let Some(point) = params.near {
            filters.push(RentalFilter::Near(point));
        }

        RentalQuery {
            filters,
            sort: params.sort,
            limit: params.limit.filter(|v| *v > 0),
            offset: params.offset.filter(|v| *v > 0),
        }
    }

    /// Appends WHERE / ORDER BY / LIMIT / OFFSET to `select`, which must end
    /// at its FROM/JOIN clauses and use `r` as the rentals alias.
    pub fn render(&self, select: &str) -> RenderedQuery {
        let mut binds = Placeholders::default();
        let mut sql = String::from(select.trim_end());

        let predicates = self
            .filters
            .iter()
            .map(|filter| filter.to_predicate(&mut binds))
            .collect::<Vec<_>>();

        if !predicates.is_empty() {
            sql.push_str("\nWHERE ");
            sql.push_str(&predicates.join("\n  AND "));
        }

        if let Some(key) = self.sort {
            sql.push_str("\nORDER BY ");
            sql.push_str(sort_column(key));
            sql.push_str(" ASC");
            if key != SortKey::Id {
                sql.push_str(", r.id ASC");
            }
        }

        if let Some(limit) = self.limit {
            sql.push_str("\nLIMIT ");
            sql.push_str(&binds.bind(SqlArg::Int8(limit)));
        }

        if let Some(offset) = self.offset {
            sql.push_str("\nOFFSET ");
            sql.push_str(&binds.bind(SqlArg::Int8(offset)));
        }

        RenderedQuery {
            sql,
            args: binds.args,
        }
    }
}

impl RentalFilter {
    fn to_predicate(&self, binds: &mut Placeholders) -> String {
        match self {
            RentalFilter::IdIn(ids) => {
                let list = ids
                    .iter()
                    .map(|id| binds.bind(SqlArg::Int4(*id)))
                    .collect::<Vec<_>>();
                format!("r.id IN ({})", list.join(", "))
            }
            RentalFilter::PriceAtLeast(min) => {
                format!("r.price_per_day >= {}", binds.bind(SqlArg::Int8(*min)))
            }
            RentalFilter::PriceAtMost(max) => {
                format!("r.price_per_day <= {}", binds.bind(SqlArg::Int8(*max)))
            }
            RentalFilter::Near(point) => {
                // Latitude is bound once and referenced twice.
                let lat = binds.bind(SqlArg::Float8(point.lat));
                let lng = binds.bind(SqlArg::Float8(point.lng));
                format!(
                    "({radius} * acos(LEAST(1.0, GREATEST(-1.0, \
                     cos(radians({lat})) * cos(radians(r.lat)) * cos(radians(r.lng) - radians({lng})) \
                     + sin(radians({lat})) * sin(radians(r.lat)))))) <= {max}",
                    radius = EARTH_RADIUS_MILES,
                    max = NEAR_RADIUS_MILES,
                )
            }
        }
    }
}

pub fn sort_column(key: SortKey) -> &'static str {
    match key {
        SortKey::Id => "r.id",
        SortKey::Name => "r.name",
        SortKey::Type => "r.type",
        SortKey::Make => "r.vehicle_make",
        SortKey::Model => "r.vehicle_model",
        SortKey::Year => "r.vehicle_year",
        SortKey::Length => "r.vehicle_length",
        SortKey::Sleeps => "r.sleeps",
        SortKey::Price => "r.price_per_day",
        SortKey::City => "r.home_city",
        SortKey::State => "r.home_state",
        SortKey::Zip => "r.home_zip",
        SortKey::Country => "r.home_country",
        SortKey::Lat => "r.lat",
        SortKey::Lng => "r.lng",
    }
}

pub fn distance_miles(from: GeoPoint, lat: f64, lng: f64) -> f64 {
    let (lat0, lng0) = (from.lat.to_radians(), from.lng.to_radians());
    let (lat1, lng1) = (lat.to_radians(), lng.to_radians());
    let cos_angle = lat0.cos() * lat1.cos() * (lng1 - lng0).cos() + lat0.sin() * lat1.sin();
    EARTH_RADIUS_MILES * cos_angle.clamp(-1.0, 1.0).acos()
}
