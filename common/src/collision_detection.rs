use crate::shapes::{Circle, Rectangle};

// Clamp the circle center into the rectangle and compare the squared distance to the
// clamped point against the squared radius. Touching counts as intersecting.
pub fn circle_rectangle(circle: &Circle, rectangle: &Rectangle) -> bool {
    let closest_x = circle.x().min(rectangle.right()).max(rectangle.left());
    let closest_y = circle.y().min(rectangle.bottom()).max(rectangle.top());

    let dx = closest_x - circle.x();
    let dy = closest_y - circle.y();
    dx * dx + dy * dy <= circle.radius * circle.radius
}

pub fn circle_circle(a: &Circle, b: &Circle) -> bool {
    let distance_sq = (a.center - b.center).norm_squared();
    let collision_distance = a.radius + b.radius;
    distance_sq <= collision_distance * collision_distance
}
