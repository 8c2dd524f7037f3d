use rand::Rng;

use super::Graph;

impl Graph {
    /// The complete graph on `n` vertices, edges in lexicographic order `(0, 1), (0, 2), ..., (n-2, n-1)`.
    pub fn complete(n: usize) -> Self {
        let mut graph = Self::with_capacity(n, n * n.saturating_sub(1) / 2);
        for a in 0..n {
            for b in a + 1..n {
                graph.add_edge_unchecked(a, b);
            }
        }
        graph
    }

    /// A random geometric graph: `n` points placed uniformly in the unit square, with an edge
    /// between every pair of points closer than `radius`.
    pub fn random_geometric<R: Rng + ?Sized>(n: usize, radius: f64, rng: &mut R) -> Self {
        let points = (0..n)
            .map(|_| (rng.gen::<f64>(), rng.gen::<f64>()))
            .collect::<Vec<_>>();
        let r2 = radius * radius;
        let mut graph = Self::new(n);
        for (a, pa) in points.iter().enumerate() {
            for (b, pb) in points.iter().enumerate().skip(a + 1) {
                let dx = pa.0 - pb.0;
                let dy = pa.1 - pb.1;
                if dx * dx + dy * dy < r2 {
                    graph.add_edge_unchecked(a, b);
                }
            }
        }
        graph
    }
}
