use grid_search::{Algorithm, Grid, SearchOutcome};

// In this example every algorithm is run on the same maze and each redraw is printed, where
// - S marks the start, E the end
// - # marks a barrier
// - o marks open cells, x closed cells and * the final path
//
// Pass algorithm names as arguments to run only those, e.g. `cargo run --example terminal -- bfs ida*`.
// Set RUST_LOG=debug to follow the iterations of IDDFS and IDA*.

const MAZE: &str = "\
S...#.....
.##.#.###.
.#......#.
.#.####.#.
...#..#...
##.#.##.#E";

fn main() {
    env_logger::init();
    let selected: Vec<Algorithm> = match std::env::args()
        .skip(1)
        .map(|arg| arg.parse::<Algorithm>())
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(algorithms) if !algorithms.is_empty() => algorithms,
        Ok(_) => Algorithm::ALL.to_vec(),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let verbose = std::env::var_os("FRAMES").is_some();

    for algorithm in selected {
        let mut grid: Grid = match MAZE.parse() {
            Ok(grid) => grid,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        };
        let mut frames = 0;
        let outcome = algorithm.solve(&mut grid, |g: &Grid| {
            frames += 1;
            if verbose {
                println!("{g}");
            }
        });
        println!("{algorithm} ({frames} redraws):");
        match outcome {
            Ok(SearchOutcome::Found { path }) => println!("{grid}path of {} moves", path.len() - 1),
            Ok(SearchOutcome::NoPath) => println!("{grid}no path"),
            Ok(SearchOutcome::LimitReached { limit }) => println!("{grid}gave up at limit {limit}"),
            Err(e) => println!("error: {e}"),
        }
        println!();
    }
}
