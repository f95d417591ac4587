/// Counts 4-connected components of filled cells in a `height × width` grid.
///
/// Uses an explicit work-list instead of recursion, so stack usage does not depend on
/// the grid size.
///
/// When `with_floor` is set, a permanently filled row is assumed below row 0: every
/// filled cell in row 0 belongs to the floor component, and the floor itself always
/// counts as one component (even when no cell touches it).
pub(crate) fn count_components<F>(height: usize, width: usize, with_floor: bool, is_filled: F) -> usize
where
    F: Fn(usize, usize) -> bool,
{
    let mut visited = vec![false; height * width];
    let mut stack = Vec::new();
    let mut components = 0;

    if with_floor {
        components += 1;
        for x in 0..width {
            if height > 0 && is_filled(0, x) && !visited[x] {
                visited[x] = true;
                stack.push((0, x));
            }
        }
        flood(height, width, &is_filled, &mut visited, &mut stack);
    }

    for y in 0..height {
        for x in 0..width {
            if !is_filled(y, x) || visited[y * width + x] {
                continue;
            }
            components += 1;
            visited[y * width + x] = true;
            stack.push((y, x));
            flood(height, width, &is_filled, &mut visited, &mut stack);
        }
    }

    components
}

fn flood<F>(
    height: usize,
    width: usize,
    is_filled: &F,
    visited: &mut [bool],
    stack: &mut Vec<(usize, usize)>,
) where
    F: Fn(usize, usize) -> bool,
{
    while let Some((y, x)) = stack.pop() {
        let neighbors = [
            y.checked_add(1).filter(|&ny| ny < height).map(|ny| (ny, x)),
            y.checked_sub(1).map(|ny| (ny, x)),
            x.checked_add(1).filter(|&nx| nx < width).map(|nx| (y, nx)),
            x.checked_sub(1).map(|nx| (y, nx)),
        ];
        for (ny, nx) in neighbors.into_iter().flatten() {
            let index = ny * width + nx;
            if !visited[index] && is_filled(ny, nx) {
                visited[index] = true;
                stack.push((ny, nx));
            }
        }
    }
}
