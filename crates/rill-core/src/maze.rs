use crate::error::{CoreError, CoreResult};

/// Generate a recursively split map with 1-tile corridors and a single
/// opening per wall.
///
/// Recursive division on an odd-sized grid: every division draws a wall
/// down the middle of a region and leaves one gap, then recurses into the
/// two halves until they are too small to divide. The result is a fully
/// connected maze-like layout whose corridors are all one tile wide —
/// handy raw material for hand-editing into levels.
pub fn split_map(width: i32, height: i32) -> CoreResult<Vec<String>> {
    if width < 3 || height < 3 || width % 2 == 0 || height % 2 == 0 {
        return Err(CoreError::BadMazeDimensions { width, height });
    }

    let (w, h) = (width as usize, height as usize);
    let mut grid = vec![vec!['.'; w]; h];
    for x in 0..w {
        grid[0][x] = '#';
        grid[h - 1][x] = '#';
    }
    for row in &mut grid {
        row[0] = '#';
        row[w - 1] = '#';
    }

    divide(&mut grid, 0, 0, w - 1, h - 1);
    Ok(grid.into_iter().map(|row| row.into_iter().collect()).collect())
}

fn choose_mid(values: &[usize]) -> Option<usize> {
    values.get(values.len() / 2).copied()
}

/// Split the region whose boundary walls sit at `(x0,y0)` and `(x1,y1)`
/// inclusive. Regions too small for a wall with openings on both sides are
/// left as open corridor.
fn divide(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize) {
    let w = x1 - x0;
    let h = y1 - y0;
    if w < 4 || h < 4 {
        return;
    }

    if w >= h {
        // Vertical wall with a single gap.
        let candidates: Vec<usize> = (x0 + 2..x1).step_by(2).collect();
        let Some(wall_x) = choose_mid(&candidates) else {
            return;
        };
        let gaps: Vec<usize> = (y0 + 1..y1).filter(|y| y % 2 == 1).collect();
        let Some(gap_y) = choose_mid(&gaps) else {
            return;
        };

        for y in y0 + 1..y1 {
            grid[y][wall_x] = '#';
        }
        grid[gap_y][wall_x] = '.';

        divide(grid, x0, y0, wall_x, y1);
        divide(grid, wall_x, y0, x1, y1);
    } else {
        // Horizontal wall with a single gap.
        let candidates: Vec<usize> = (y0 + 2..y1).step_by(2).collect();
        let Some(wall_y) = choose_mid(&candidates) else {
            return;
        };
        let gaps: Vec<usize> = (x0 + 1..x1).filter(|x| x % 2 == 1).collect();
        let Some(gap_x) = choose_mid(&gaps) else {
            return;
        };

        for x in x0 + 1..x1 {
            grid[wall_y][x] = '#';
        }
        grid[wall_y][gap_x] = '.';

        divide(grid, x0, y0, x1, wall_y);
        divide(grid, x0, wall_y, x1, y1);
    }
}
