//! Transverse Mercator projection on the GRS80 ellipsoid.
//!
//! Both supported projected systems are UTM zone 32N variants sharing the
//! central meridian 9°E and scale factor 0.9996; they differ only in the
//! false easting (EPSG:5652 keeps the zone prefix "32" in the easting).
//! Parameters are hardcoded — this is not a projection registry.
//!
//! Forward and inverse use the standard series expansions (Snyder,
//! "Map Projections — A Working Manual", eqs. 8-9..8-25), accurate to well
//! under a meter across the zone.

use std::f64::consts::PI;

/// Transverse Mercator projection parameters.
#[derive(Debug, Clone)]
pub struct TransverseMercator {
    /// Central meridian in radians.
    pub lon0: f64,
    /// Scale factor at the central meridian.
    pub k0: f64,
    /// False easting (meters).
    pub false_easting: f64,
    /// Semi-major axis (meters).
    pub a: f64,
    /// First eccentricity squared.
    e2: f64,
    /// Second eccentricity squared.
    ep2: f64,
}

impl TransverseMercator {
    /// Create a projection from explicit parameters.
    ///
    /// # Arguments
    /// * `lon0_deg` - Central meridian (degrees)
    /// * `k0` - Scale factor at the central meridian
    /// * `false_easting` - False easting (meters)
    pub fn new(lon0_deg: f64, k0: f64, false_easting: f64) -> Self {
        // GRS80 ellipsoid
        let a = 6378137.0;
        let f = 1.0 / 298.257222101;

        let e2 = f * (2.0 - f);
        let ep2 = e2 / (1.0 - e2);

        Self {
            lon0: lon0_deg * PI / 180.0,
            k0,
            false_easting,
            a,
            e2,
            ep2,
        }
    }

    /// ETRS89 / UTM zone 32N (EPSG:25832).
    pub fn epsg_25832() -> Self {
        Self::new(9.0, 0.9996, 500_000.0)
    }

    /// ETRS89 / UTM zone 32N with zone prefix (EPSG:5652).
    pub fn epsg_5652() -> Self {
        Self::new(9.0, 0.9996, 32_500_000.0)
    }

    /// Meridian arc length from the equator to `lat` (radians).
    fn meridian_arc(&self, lat: f64) -> f64 {
        let e2 = self.e2;
        let e4 = e2 * e2;
        let e6 = e4 * e2;

        self.a
            * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * lat
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * lat).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * lat).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * lat).sin())
    }

    /// Convert geographic coordinates (degrees) to projected easting/northing
    /// (meters).
    pub fn geo_to_projected(&self, lat_deg: f64, lon_deg: f64) -> (f64, f64) {
        let to_rad = PI / 180.0;
        let lat = lat_deg * to_rad;
        let lon = lon_deg * to_rad;

        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let tan_lat = lat.tan();

        let n = self.a / (1.0 - self.e2 * sin_lat * sin_lat).sqrt();
        let t = tan_lat * tan_lat;
        let c = self.ep2 * cos_lat * cos_lat;
        let a_term = (lon - self.lon0) * cos_lat;
        let m = self.meridian_arc(lat);

        let a2 = a_term * a_term;
        let a3 = a2 * a_term;
        let a4 = a3 * a_term;
        let a5 = a4 * a_term;
        let a6 = a5 * a_term;

        let easting = self.k0
            * n
            * (a_term
                + (1.0 - t + c) * a3 / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * self.ep2) * a5 / 120.0)
            + self.false_easting;

        let northing = self.k0
            * (m + n * tan_lat
                * (a2 / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * self.ep2) * a6 / 720.0));

        (easting, northing)
    }

    /// Convert projected easting/northing (meters) to geographic coordinates
    /// (degrees).
    pub fn projected_to_geo(&self, easting: f64, northing: f64) -> (f64, f64) {
        let to_deg = 180.0 / PI;
        let x = easting - self.false_easting;

        let e2 = self.e2;
        let e4 = e2 * e2;
        let e6 = e4 * e2;

        // Footpoint latitude from the rectifying latitude mu
        let m = northing / self.k0;
        let mu = m / (self.a * (1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));
        let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());

        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

        let sin_phi1 = phi1.sin();
        let cos_phi1 = phi1.cos();
        let tan_phi1 = phi1.tan();

        let c1 = self.ep2 * cos_phi1 * cos_phi1;
        let t1 = tan_phi1 * tan_phi1;
        let n1 = self.a / (1.0 - e2 * sin_phi1 * sin_phi1).sqrt();
        let r1 = self.a * (1.0 - e2) / (1.0 - e2 * sin_phi1 * sin_phi1).powf(1.5);
        let d = x / (n1 * self.k0);

        let d2 = d * d;
        let d3 = d2 * d;
        let d4 = d3 * d;
        let d5 = d4 * d;
        let d6 = d5 * d;

        let lat = phi1
            - (n1 * tan_phi1 / r1)
                * (d2 / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * self.ep2) * d4 / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                        - 252.0 * self.ep2
                        - 3.0 * c1 * c1)
                        * d6
                        / 720.0);

        let lon = self.lon0
            + (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
                + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * self.ep2 + 24.0 * t1 * t1)
                    * d5
                    / 120.0)
                / cos_phi1;

        (lat * to_deg, lon * to_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_52n_9e() {
        // Central-meridian benchmark: 52°N 9°E is E 500000, N 5761038.213
        // in EPSG:25832.
        let proj = TransverseMercator::epsg_25832();

        let (lat, lon) = proj.projected_to_geo(500_000.0, 5_761_038.213);
        assert!((lat - 52.0).abs() < 1e-7, "lat should be ~52, got {}", lat);
        assert!((lon - 9.0).abs() < 1e-7, "lon should be ~9, got {}", lon);

        let (e, n) = proj.geo_to_projected(52.0, 9.0);
        assert!((e - 500_000.0).abs() < 0.5, "easting off: {}", e);
        assert!((n - 5_761_038.213).abs() < 0.5, "northing off: {}", n);
    }

    #[test]
    fn test_project_area_point() {
        // Seligenstadt area reference point.
        let proj = TransverseMercator::epsg_25832();
        let (e, n) = proj.geo_to_projected(50.0569, 9.0067);
        assert!((e - 500_479.602).abs() < 0.5, "easting off: {}", e);
        assert!((n - 5_544_957.158).abs() < 0.5, "northing off: {}", n);
    }

    #[test]
    fn test_zone_prefix_offsets_easting_only() {
        let utm = TransverseMercator::epsg_25832();
        let prefixed = TransverseMercator::epsg_5652();

        let (e1, n1) = utm.geo_to_projected(50.0569, 9.0067);
        let (e2, n2) = prefixed.geo_to_projected(50.0569, 9.0067);

        assert!((e2 - e1 - 32_000_000.0).abs() < 1e-6);
        assert!((n2 - n1).abs() < 1e-9);
    }

    #[test]
    fn test_roundtrip() {
        let proj = TransverseMercator::epsg_25832();

        for &(lat, lon) in &[(49.8783, 8.5359), (50.2397, 9.381), (52.0, 9.0)] {
            let (e, n) = proj.geo_to_projected(lat, lon);
            let (lat2, lon2) = proj.projected_to_geo(e, n);
            assert!((lat2 - lat).abs() < 1e-8, "lat roundtrip: {} vs {}", lat, lat2);
            assert!((lon2 - lon).abs() < 1e-8, "lon roundtrip: {} vs {}", lon, lon2);
        }
    }

    #[test]
    fn test_central_meridian_maps_to_false_easting() {
        let proj = TransverseMercator::epsg_25832();
        let (e, _) = proj.geo_to_projected(48.0, 9.0);
        assert!((e - 500_000.0).abs() < 1e-6);
    }
}
