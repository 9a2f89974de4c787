use motiongraph::Graph;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let g = Graph::from_json(include_str!("../tests/data/scenes/title_card.json"))?;

    for t in [-0.5, 0.0, 0.25, 1.0, 2.5, 4.999, 6.0] {
        let s = g.evaluate(t);
        println!("t={t:>6.3}: {} values, {}", s.values().count(), s.fingerprint());
        for (idx, v) in s.values() {
            println!("  {:<10} {:?}", g.node_id(idx), v);
        }
    }

    Ok(())
}
